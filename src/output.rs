//! PNG loading and saving

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for image file operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image decoding or encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Load an image file as straight-alpha RGBA8.
///
/// Any format the `image` crate can decode is accepted; non-RGBA inputs are
/// converted.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, OutputError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Save an RGBA image to a PNG file.
///
/// Creates missing parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Output path for a blend: the `-o` value when given, else the destination
/// file itself.
pub fn output_path(dest: &Path, output_arg: Option<&Path>) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                let name =
                    dest.file_name().map(PathBuf::from).unwrap_or_else(|| "blend.png".into());
                output.join(name)
            } else {
                output.to_path_buf()
            }
        }
        None => dest.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("nested").join("out.png");
        let image = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 128]));

        save_png(&image, &path).expect("should save png");
        let loaded = load_rgba(&path).expect("should load png");
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_rgba(&temp.path().join("missing.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_output_path_defaults_to_dest() {
        assert_eq!(output_path(Path::new("a/dest.png"), None), PathBuf::from("a/dest.png"));
    }

    #[test]
    fn test_output_path_explicit_file() {
        assert_eq!(
            output_path(Path::new("dest.png"), Some(Path::new("out/result.png"))),
            PathBuf::from("out/result.png")
        );
    }

    #[test]
    fn test_output_path_directory() {
        assert_eq!(
            output_path(Path::new("in/dest.png"), Some(Path::new("out/"))),
            PathBuf::from("out/dest.png")
        );
    }
}
