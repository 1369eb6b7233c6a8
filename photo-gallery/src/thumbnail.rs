use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Error type for preview generation
#[derive(Debug)]
pub enum ThumbnailError {
    ImageLoadError(String),
    ImageSaveError(String),
    IoError(std::io::Error),
    TaskFailed(String),
}

impl std::fmt::Display for ThumbnailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThumbnailError::ImageLoadError(msg) => write!(f, "Image load error: {}", msg),
            ThumbnailError::ImageSaveError(msg) => write!(f, "Image save error: {}", msg),
            ThumbnailError::IoError(e) => write!(f, "IO error: {}", e),
            ThumbnailError::TaskFailed(msg) => write!(f, "Preview task failed: {}", msg),
        }
    }
}

impl std::error::Error for ThumbnailError {}

impl From<std::io::Error> for ThumbnailError {
    fn from(err: std::io::Error) -> Self {
        ThumbnailError::IoError(err)
    }
}

/// Downscaled JPEG preview as a `data:` URL, longest edge `max_size`
pub fn preview_data_url(path: &Path, max_size: u32) -> Result<String, ThumbnailError> {
    let img = image::open(path).map_err(|e| {
        ThumbnailError::ImageLoadError(format!("Failed to load {}: {}", path.display(), e))
    })?;

    // JPEG has no alpha channel
    let preview = DynamicImage::ImageRgb8(img.thumbnail(max_size, max_size).to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    preview
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| ThumbnailError::ImageSaveError(format!("Failed to encode preview: {}", e)))?;

    Ok(to_data_url("image/jpeg", &buffer.into_inner()))
}

/// The untouched file as a `data:` URL, for full size display
pub fn original_data_url(path: &Path) -> Result<String, ThumbnailError> {
    let bytes = std::fs::read(path)?;
    Ok(to_data_url(mime_for(path), &bytes))
}

/// `preview_data_url` on the blocking pool
pub async fn load_preview(path: PathBuf, max_size: u32) -> Result<String, ThumbnailError> {
    tokio::task::spawn_blocking(move || preview_data_url(&path, max_size))
        .await
        .map_err(|e| ThumbnailError::TaskFailed(format!("Task join error: {}", e)))?
}

fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") | Some("heif") => "image/heic",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_is_downscaled_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.jpg");
        image::RgbImage::from_pixel(400, 200, image::Rgb([10, 120, 240]))
            .save(&path)
            .unwrap();

        let url = preview_data_url(&path, 100).unwrap();
        let encoded = url.strip_prefix("data:image/jpeg;base64,").unwrap();
        let bytes = general_purpose::STANDARD.decode(encoded).unwrap();
        let preview = image::load_from_memory(&bytes).unwrap();

        assert_eq!(preview.width(), 100);
        assert_eq!(preview.height(), 50);
    }

    #[test]
    fn test_original_data_url_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.webp");
        std::fs::write(&path, b"abc").unwrap();

        let url = original_data_url(&path).unwrap();
        assert_eq!(url, "data:image/webp;base64,YWJj");
    }

    #[test]
    fn test_preview_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = preview_data_url(&dir.path().join("missing.jpg"), 64);
        assert!(matches!(result, Err(ThumbnailError::ImageLoadError(_))));
    }
}
