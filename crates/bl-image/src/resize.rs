use anyhow::Result;
use bl_core::CoreError;
use image::GrayImage;

/// Resizer réutilisable en plus proche voisin, échantillonnage `floor(dst × src / dst_len)`.
///
/// Destination pixel `d` reads source pixel `d * src_len / dst_len` (integer
/// division), the same source columns and rows as OpenCV's `INTER_NEAREST`.
/// A 48 → 24 downscale keeps columns `0, 2, 4, …`. No intermediate gray
/// levels are introduced, so a pure black/white input stays pure black/white.
///
/// # Example
/// ```
/// use bl_image::resize::Resizer;
/// use image::GrayImage;
/// let mut r = Resizer::new();
/// let out = r.resize(&GrayImage::new(100, 40), 24, 24).unwrap();
/// assert_eq!(out.dimensions(), (24, 24));
/// ```
#[derive(Debug, Default)]
pub struct Resizer {
    // Tables d'index réutilisées tant que les dimensions ne changent pas.
    xs: AxisMap,
    ys: AxisMap,
}

#[derive(Debug, Default)]
struct AxisMap {
    src_len: u32,
    index: Vec<u32>,
}

impl AxisMap {
    fn update(&mut self, src_len: u32, dst_len: u32) -> &[u32] {
        if self.src_len != src_len || self.index.len() != dst_len as usize {
            self.src_len = src_len;
            self.index = (0..dst_len).map(|d| source_index(d, src_len, dst_len)).collect();
        }
        &self.index
    }
}

/// Source pixel sampled for destination pixel `dst` (`dst_len` must be non-zero).
#[inline(always)]
#[must_use]
pub fn source_index(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    (u64::from(dst) * u64::from(src_len) / u64::from(dst_len)) as u32
}

impl Resizer {
    /// Create a new nearest-neighbour resizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize `src` to exactly `width × height`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either image has a zero dimension.
    pub fn resize(&mut self, src: &GrayImage, width: u32, height: u32) -> Result<GrayImage> {
        if src.dimensions() == (width, height) {
            return Ok(src.clone());
        }

        let (src_w, src_h) = src.dimensions();
        for (w, h) in [(src_w, src_h), (width, height)] {
            if w == 0 || h == 0 {
                return Err(CoreError::InvalidDimensions {
                    width: w,
                    height: h,
                }
                .into());
            }
        }

        let xs = self.xs.update(src_w, width);
        let ys = self.ys.update(src_h, height);
        Ok(GrayImage::from_fn(width, height, |x, y| {
            *src.get_pixel(xs[x as usize], ys[y as usize])
        }))
    }
}
