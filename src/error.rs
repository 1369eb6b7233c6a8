use photo_gallery::{CaptureError, StoreError, ThumbnailError};
use std::fmt;

/// Central error types for the gallery app
#[derive(Debug)]
pub enum AppError {
    /// Image store error
    Storage(StoreError),
    /// Camera / picker / save pipeline error
    Capture(CaptureError),
    /// Image could not be loaded for display
    Image(ThumbnailError),
    /// Resource not found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Storage(e) => write!(f, "{}", e),
            AppError::Capture(e) => write!(f, "{}", e),
            AppError::Image(e) => write!(f, "Image error: {}", e),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Storage(e)
    }
}

impl From<CaptureError> for AppError {
    fn from(e: CaptureError) -> Self {
        AppError::Capture(e)
    }
}

impl From<ThumbnailError> for AppError {
    fn from(e: ThumbnailError) -> Self {
        AppError::Image(e)
    }
}

/// User-friendly error messages for dialogs
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(StoreError::Init(_)) | AppError::Storage(StoreError::NotInitialized) => {
                "The photo database could not be opened.".to_string()
            }
            AppError::Storage(e) if e.is_write_error() => "Failed to save changes.".to_string(),
            AppError::Storage(_) => "Failed to load images.".to_string(),
            AppError::Capture(CaptureError::Cancelled) => "Capture cancelled.".to_string(),
            AppError::Capture(CaptureError::Acquire(_)) => "Failed to capture image.".to_string(),
            AppError::Capture(CaptureError::Persist(_)) => "Failed to save image.".to_string(),
            AppError::Image(_) => "The image could not be displayed.".to_string(),
            AppError::NotFound(msg) => format!("{} was not found.", msg),
        }
    }

    /// Whether the app cannot continue at all
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::Storage(StoreError::Init(_)) | AppError::Storage(StoreError::NotInitialized)
        )
    }

    /// Cancelled captures are not reported to the user
    pub fn is_silent(&self) -> bool {
        matches!(self, AppError::Capture(CaptureError::Cancelled))
    }
}
