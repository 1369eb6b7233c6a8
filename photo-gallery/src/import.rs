use std::path::{Path, PathBuf};

/// Error type for bringing an acquired photo into gallery storage
#[derive(Debug)]
pub enum ImportError {
    SourceMissing(PathBuf),
    NotAnImage(String),
    IoError(std::io::Error),
    TaskFailed(String),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::SourceMissing(path) => {
                write!(f, "Source file not found: {}", path.display())
            }
            ImportError::NotAnImage(msg) => write!(f, "Not a readable image: {}", msg),
            ImportError::IoError(e) => write!(f, "IO error: {}", e),
            ImportError::TaskFailed(msg) => write!(f, "Import task failed: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::IoError(err)
    }
}

/// A photo copied into gallery storage
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedPhoto {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Reads only the image header and returns its dimensions
pub fn probe_image(path: &Path) -> Result<(u32, u32), ImportError> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| ImportError::NotAnImage(format!("{}: {}", path.display(), e)))
}

/// Copies `source` into `storage_dir` under a fresh UUID file name.
///
/// The source must exist and decode as an image. It is never modified.
/// Runs on the blocking pool.
pub async fn import_photo(source: &Path, storage_dir: &Path) -> Result<ImportedPhoto, ImportError> {
    let source = source.to_path_buf();
    let storage_dir = storage_dir.to_path_buf();

    tokio::task::spawn_blocking(move || import_photo_blocking(&source, &storage_dir))
        .await
        .map_err(|e| ImportError::TaskFailed(format!("Task join error: {}", e)))?
}

fn import_photo_blocking(source: &Path, storage_dir: &Path) -> Result<ImportedPhoto, ImportError> {
    log::debug!("Importing photo from {}", source.display());

    if !source.is_file() {
        return Err(ImportError::SourceMissing(source.to_path_buf()));
    }
    let (width, height) = probe_image(source)?;

    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "jpg".to_string());
    let file_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);

    std::fs::create_dir_all(storage_dir)?;
    let target = storage_dir.join(file_name);
    std::fs::copy(source, &target)?;
    log::debug!("Copied to {}", target.display());

    Ok(ImportedPhoto {
        path: target,
        width,
        height,
    })
}
