use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::processing::color::rgb_to_hsv;
use crate::processing::sampler::PixelSampler;

/// Extensions accepted from drag-and-drop and offered in the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Image file '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    #[error("Could not load image '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded image together with its HSV conversion.
pub struct ImageSource {
    path: Option<PathBuf>,
    rgb: RgbImage,
    hsv: RgbImage,
}

impl ImageSource {
    /// Decode an image file and build its HSV buffer.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound { path: path.to_path_buf() });
        }
        let decoded = image::open(path).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let mut source = Self::from_rgb(decoded.to_rgb8());
        source.path = Some(path.to_path_buf());
        tracing::info!(
            "Loaded image {:?} ({}x{})",
            path,
            source.rgb.width(),
            source.rgb.height()
        );
        Ok(source)
    }

    pub fn from_rgb(rgb: RgbImage) -> Self {
        let hsv = RgbImage::from_fn(rgb.width(), rgb.height(), |x, y| {
            let [r, g, b] = rgb.get_pixel(x, y).0;
            let hsv = rgb_to_hsv(r, g, b);
            Rgb([hsv.h, hsv.s, hsv.v])
        });
        Self { path: None, rgb, hsv }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.rgb.dimensions()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.rgb.width() && y < self.rgb.height()
    }

    pub fn sampler(&self) -> PixelSampler<'_> {
        PixelSampler::new(&self.rgb, &self.hsv)
    }

    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// Short name for the footer: the file name, or "untitled".
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }
}

/// Whether a dropped file looks like something we can decode.
pub fn has_image_extension(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::statistics::Sample;

    #[test]
    fn from_rgb_builds_matching_hsv() {
        let mut rgb = RgbImage::new(4, 3);
        rgb.put_pixel(3, 2, Rgb([0, 0, 255]));
        let source = ImageSource::from_rgb(rgb);

        assert_eq!(source.dimensions(), (4, 3));
        let reading = source.sampler().sample(3, 2);
        assert_eq!(reading.rgb, [0, 0, 255]);
        assert_eq!(reading.hsv, Sample::new(120, 255, 255));
    }

    #[test]
    fn contains_checks_both_axes() {
        let source = ImageSource::from_rgb(RgbImage::new(4, 3));
        assert!(source.contains(0, 0));
        assert!(source.contains(3, 2));
        assert!(!source.contains(4, 0));
        assert!(!source.contains(0, 3));
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = Path::new("/definitely/not/here.png");
        match ImageSource::open(path) {
            Err(LoadError::NotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn undecodable_file_is_decode_error() {
        let path = std::env::temp_dir().join("hsv_viewer_not_an_image.png");
        std::fs::write(&path, b"plain text").unwrap();
        let result = ImageSource::open(&path);
        let _ = std::fs::remove_file(&path);
        let err = result.err().expect("text should not decode");
        assert!(matches!(err, LoadError::Decode { .. }));
        assert!(err.to_string().starts_with("Could not load image"));
    }

    #[test]
    fn open_round_trips_through_png() {
        let path = std::env::temp_dir().join("hsv_viewer_open_test.png");
        let mut rgb = RgbImage::new(2, 2);
        rgb.put_pixel(1, 1, Rgb([255, 0, 0]));
        rgb.save(&path).unwrap();

        let source = ImageSource::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(source.display_name(), "hsv_viewer_open_test.png");
        assert_eq!(source.sampler().sample(1, 1).hsv, Sample::new(0, 255, 255));
    }

    #[test]
    fn extension_filter_ignores_case() {
        assert!(has_image_extension(Path::new("a/b/photo.JPG")));
        assert!(has_image_extension(Path::new("scan.tiff")));
        assert!(!has_image_extension(Path::new("data.csv")));
        assert!(!has_image_extension(Path::new("noext")));
    }
}
