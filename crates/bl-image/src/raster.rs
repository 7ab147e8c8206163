use bl_core::config::{QuantizeConfig, QuantizeMode};
use bl_core::matrix::BitMatrix;
use image::{GrayImage, Luma};

/// Intensity of a set bit.
pub const ON: u8 = 255;

/// Pixel → bit rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Quantizer {
    /// Division entière par 255 : seul le blanc pur donne 1, 1..=254 → 0.
    #[default]
    Floor,
    /// `pixel >= t` gives 1.
    Threshold(u8),
}

impl Quantizer {
    /// Maps one pixel to a bit.
    #[inline(always)]
    #[must_use]
    pub fn bit(self, pixel: u8) -> bool {
        match self {
            Self::Floor => pixel / ON == 1,
            Self::Threshold(t) => pixel >= t,
        }
    }
}

impl From<QuantizeConfig> for Quantizer {
    fn from(config: QuantizeConfig) -> Self {
        match config.mode {
            QuantizeMode::Floor => Self::Floor,
            QuantizeMode::Threshold => Self::Threshold(config.threshold),
        }
    }
}

/// Rend une matrice de bits en image : bit × 255.
///
/// # Example
/// ```
/// use bl_core::matrix::BitMatrix;
/// use bl_image::raster::render;
/// let m = BitMatrix::from_bitlines(&["01"]).unwrap();
/// assert_eq!(render(&m).into_raw(), vec![0, 255]);
/// ```
#[must_use]
pub fn render(matrix: &BitMatrix) -> GrayImage {
    GrayImage::from_fn(matrix.width(), matrix.height(), |x, y| {
        Luma([u8::from(matrix.get(x, y)) * ON])
    })
}

/// Quantizes a grayscale image into a bit matrix.
///
/// # Example
/// ```
/// use bl_image::raster::{quantize, Quantizer};
/// use image::GrayImage;
/// let img = GrayImage::from_raw(3, 1, vec![0, 200, 255]).unwrap();
/// assert_eq!(quantize(&img, Quantizer::Floor).to_bitlines(), vec!["001"]);
/// assert_eq!(quantize(&img, Quantizer::Threshold(128)).to_bitlines(), vec!["011"]);
/// ```
#[must_use]
pub fn quantize(img: &GrayImage, quantizer: Quantizer) -> BitMatrix {
    let (width, height) = img.dimensions();
    let mut matrix = BitMatrix::new(width, height);
    for (x, y, px) in img.enumerate_pixels() {
        matrix.set(x, y, quantizer.bit(px.0[0]));
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross() -> BitMatrix {
        BitMatrix::from_bitlines(&["010", "101", "010"]).unwrap()
    }

    #[test]
    fn render_cross_pixels() {
        let img = render(&cross());
        assert_eq!(img.dimensions(), (3, 3));
        assert_eq!(
            img.into_raw(),
            vec![0, 255, 0, 255, 0, 255, 0, 255, 0]
        );
    }

    #[test]
    fn quantize_inverts_render() {
        let m = cross();
        assert_eq!(quantize(&render(&m), Quantizer::Floor), m);
        assert_eq!(quantize(&render(&m), Quantizer::Threshold(1)), m);
    }

    #[test]
    fn floor_drops_every_gray_level() {
        for p in 0..=254u8 {
            assert!(!Quantizer::Floor.bit(p), "{p} should quantize to 0");
        }
        assert!(Quantizer::Floor.bit(255));
    }

    #[test]
    fn quantizer_from_config() {
        let mut config = QuantizeConfig::default();
        assert_eq!(Quantizer::from(config), Quantizer::Floor);
        config.mode = QuantizeMode::Threshold;
        config.threshold = 90;
        assert_eq!(Quantizer::from(config), Quantizer::Threshold(90));
    }
}
