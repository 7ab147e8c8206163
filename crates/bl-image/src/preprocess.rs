use anyhow::Result;
use bl_core::config::PreprocessConfig;
use image::GrayImage;

use crate::resize::Resizer;

/// Inverse l'intensité de chaque pixel : `255 - p`.
///
/// Involutive: applying it twice restores the input.
///
/// # Example
/// ```
/// use bl_image::preprocess::invert;
/// use image::GrayImage;
/// let mut img = GrayImage::from_raw(3, 1, vec![0, 100, 255]).unwrap();
/// invert(&mut img);
/// assert_eq!(img.as_raw(), &vec![255, 155, 0]);
/// ```
pub fn invert(img: &mut GrayImage) {
    for px in img.pixels_mut() {
        px.0[0] = u8::MAX - px.0[0];
    }
}

/// Raw glyph → panel-ready glyph: optional inversion, then nearest resize.
pub struct Preprocessor {
    config: PreprocessConfig,
    resizer: Resizer,
}

impl Preprocessor {
    /// Create a preprocessor for the given target settings.
    #[must_use]
    pub fn new(config: PreprocessConfig) -> Self {
        Self {
            config,
            resizer: Resizer::new(),
        }
    }

    /// Target `(width, height)`.
    #[must_use]
    pub fn target(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Applies the pipeline to one image.
    ///
    /// # Errors
    /// Returns an error if the source image is empty or the resize fails.
    ///
    /// # Example
    /// ```
    /// use bl_core::config::PreprocessConfig;
    /// use bl_image::preprocess::Preprocessor;
    /// use image::GrayImage;
    /// let mut p = Preprocessor::new(PreprocessConfig::default());
    /// let out = p.process(GrayImage::new(64, 48)).unwrap();
    /// assert_eq!(out.dimensions(), (24, 24));
    /// assert!(out.pixels().all(|px| px.0[0] == 255));
    /// ```
    pub fn process(&mut self, mut img: GrayImage) -> Result<GrayImage> {
        if self.config.invert {
            invert(&mut img);
        }
        let (w, h) = self.target();
        self.resizer.resize(&img, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_is_involutive() {
        let raw: Vec<u8> = (0..=255).collect();
        let mut img = GrayImage::from_raw(16, 16, raw.clone()).unwrap();
        invert(&mut img);
        invert(&mut img);
        assert_eq!(img.into_raw(), raw);
    }

    #[test]
    fn output_is_always_target_size() {
        let mut p = Preprocessor::new(PreprocessConfig::default());
        for (w, h) in [(1, 1), (24, 24), (7, 300), (500, 13)] {
            let out = p.process(GrayImage::new(w, h)).unwrap();
            assert_eq!(out.dimensions(), (24, 24), "input {w}×{h}");
        }
    }

    #[test]
    fn invert_can_be_disabled() {
        let mut p = Preprocessor::new(PreprocessConfig {
            invert: false,
            ..PreprocessConfig::default()
        });
        let out = p.process(GrayImage::new(48, 48)).unwrap();
        assert!(out.pixels().all(|px| px.0[0] == 0));
    }

    #[test]
    fn empty_image_fails() {
        let mut p = Preprocessor::new(PreprocessConfig::default());
        assert!(p.process(GrayImage::new(0, 0)).is_err());
    }
}
