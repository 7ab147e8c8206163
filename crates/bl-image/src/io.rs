use std::path::Path;

use anyhow::{Context, Result};
use bl_core::CoreError;
use image::{GrayImage, ImageFormat};

/// Charge une image depuis le disque et la convertit en niveaux de gris 8 bits.
///
/// The format is guessed from the file content, not the extension.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use bl_image::io::load_gray;
/// use std::path::Path;
/// let img = load_gray(Path::new("assets/images/A.png")).unwrap();
/// ```
pub fn load_gray(path: &Path) -> Result<GrayImage> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("Impossible d'ouvrir {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Impossible de lire {}", path.display()))?
        .decode()
        .with_context(|| format!("Impossible de décoder {}", path.display()))?;
    log::debug!(
        "{} : {}×{} ({:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img.to_luma8())
}

/// Writes a single-channel PNG.
///
/// # Errors
/// Returns an error for a zero-sized image or if encoding fails.
pub fn save_png(path: &Path, img: &GrayImage) -> Result<()> {
    save_as(path, img, ImageFormat::Png)
}

/// Writes an image, choosing the encoder from the path extension.
///
/// # Errors
/// Returns an error for a zero-sized image, an unknown extension, or if
/// encoding fails.
pub fn save_gray(path: &Path, img: &GrayImage) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Format de sortie inconnu : {}", path.display()))?;
    save_as(path, img, format)
}

fn save_as(path: &Path, img: &GrayImage, format: ImageFormat) -> Result<()> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(anyhow::Error::new(CoreError::InvalidDimensions { width, height })
            .context(format!("Image vide pour {}", path.display())));
    }
    img.save_with_format(path, format)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.png");
        let img = GrayImage::from_raw(2, 1, vec![0, 255]).unwrap();
        save_png(&path, &img).unwrap();
        let back = load_gray(&path).unwrap();
        assert_eq!(back.into_raw(), vec![0, 255]);
    }

    #[test]
    fn zero_sized_image_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_png(&dir.path().join("empty.png"), &GrayImage::new(0, 0)).unwrap_err();
        assert!(format!("{err:#}").contains("Dimensions invalides"));
    }

    #[test]
    fn garbage_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "pas une image").unwrap();
        assert!(load_gray(&path).is_err());
    }

    #[test]
    fn unknown_extension_rejected_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let img = GrayImage::new(1, 1);
        assert!(save_gray(&dir.path().join("g.unknownext"), &img).is_err());
    }
}
