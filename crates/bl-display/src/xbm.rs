use anyhow::Result;
use bl_core::CoreError;

use crate::canvas::DisplayCanvas;

/// Replie le panneau `W×H` en `W/2 × 2H` puis empaquette 8 LEDs par octet,
/// bit de poids faible en premier (ordre XBM).
///
/// The left half of the panel becomes the top `H` rows, the right half the
/// bottom `H` rows. A 256×32 panel gives 128×64, i.e. 1024 bytes.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] unless the width is a non-zero
/// multiple of 16.
///
/// # Example
/// ```
/// use bl_display::canvas::DisplayCanvas;
/// use bl_display::xbm::pack_xbm;
/// let canvas = DisplayCanvas::new(256, 32);
/// assert_eq!(pack_xbm(&canvas).unwrap().len(), 1024);
/// ```
pub fn pack_xbm(canvas: &DisplayCanvas) -> Result<Vec<u8>> {
    let (width, height) = (canvas.width(), canvas.height());
    if width == 0 || height == 0 || width % 16 != 0 {
        return Err(CoreError::InvalidDimensions { width, height }.into());
    }

    let out_w = width / 2;
    let out_h = height * 2;
    let bytes_per_row = out_w / 8;
    let mut buffer = Vec::with_capacity((bytes_per_row * out_h) as usize);

    for y_out in 0..out_h {
        for byte_index in 0..bytes_per_row {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x_out = byte_index * 8 + bit;
                let (x_in, y_in) = if y_out < height {
                    (x_out, y_out)
                } else {
                    (x_out + out_w, y_out - height)
                };
                if canvas.get(x_in, y_in) {
                    byte |= 1 << bit;
                }
            }
            buffer.push(byte);
        }
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bl_core::matrix::BitMatrix;

    fn lit_at(points: &[(u32, u32)]) -> DisplayCanvas {
        let mut canvas = DisplayCanvas::new(256, 32);
        let dot = BitMatrix::from_bitlines(&["1"]).unwrap();
        for &(x, y) in points {
            canvas.draw_image(&dot, x, y);
        }
        canvas
    }

    #[test]
    fn dark_panel_packs_to_zeros() {
        let bytes = pack_xbm(&DisplayCanvas::new(256, 32)).unwrap();
        assert_eq!(bytes.len(), 1024);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn bits_are_lsb_first() {
        let bytes = pack_xbm(&lit_at(&[(0, 0), (9, 0)])).unwrap();
        assert_eq!(bytes[0], 0b0000_0001);
        assert_eq!(bytes[1], 0b0000_0010);
    }

    #[test]
    fn right_half_folds_below() {
        // (128, 0) is the first LED of the right half → row 32, byte 0.
        let bytes = pack_xbm(&lit_at(&[(128, 0), (255, 31)])).unwrap();
        assert_eq!(bytes[32 * 16], 0b0000_0001);
        assert_eq!(bytes[63 * 16 + 15], 0b1000_0000);
        assert_eq!(bytes.iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn odd_width_rejected() {
        assert!(pack_xbm(&DisplayCanvas::new(100, 32)).is_err());
    }
}
