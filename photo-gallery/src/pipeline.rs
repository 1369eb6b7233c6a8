// Capture pipeline: acquire -> locate -> persist
//
// The place is resolved before anything is written. A failed write removes
// the imported copy again.

use crate::geocode::{resolve_place, Geocoder};
use crate::import::{import_photo, ImportError};
use crate::location::DeviceLocator;
use crate::models::{Coordinates, GalleryConfig, PlaceName, UnresolvedReason};
use crate::picker::{self, AndroidPickerConfig, PickerError};
use crate::store::{ImageStore, StoreError};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Take a new photo with the camera
    Camera,
    /// Pick an existing photo from the device library
    Library,
}

/// Produces the file path of a freshly captured or picked photo
pub trait ImageSource {
    fn acquire(&self, mode: CaptureMode) -> Result<PathBuf, PickerError>;
}

/// Camera and library access through the platform picker
#[derive(Debug, Clone, Default)]
pub struct PlatformImageSource {
    config: AndroidPickerConfig,
}

impl PlatformImageSource {
    pub fn new(config: AndroidPickerConfig) -> Self {
        Self { config }
    }

    /// `false` also when the platform has no camera bridge
    pub fn has_camera_permission(&self) -> bool {
        match picker::has_camera_permission_with_config(&self.config) {
            Ok(granted) => granted,
            Err(e) => {
                log::warn!("Could not query camera permission: {}", e);
                false
            }
        }
    }
}

impl ImageSource for PlatformImageSource {
    fn acquire(&self, mode: CaptureMode) -> Result<PathBuf, PickerError> {
        match mode {
            CaptureMode::Camera => picker::capture_photo_with_config(&self.config),
            CaptureMode::Library => picker::pick_image_with_config(&self.config),
        }
    }
}

#[derive(Debug)]
pub enum CaptureError {
    /// The user backed out of the camera or picker
    Cancelled,
    Acquire(String),
    Persist(StoreError),
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureError::Cancelled => write!(f, "Capture cancelled"),
            CaptureError::Acquire(msg) => write!(f, "Failed to acquire image: {}", msg),
            CaptureError::Persist(e) => write!(f, "Failed to save image: {}", e),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<PickerError> for CaptureError {
    fn from(err: PickerError) -> Self {
        match err {
            PickerError::Cancelled(_) => CaptureError::Cancelled,
            other => CaptureError::Acquire(other.to_string()),
        }
    }
}

impl From<ImportError> for CaptureError {
    fn from(err: ImportError) -> Self {
        CaptureError::Acquire(err.to_string())
    }
}

/// Photo copied into gallery storage, not yet located
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Camera capture to delete once the record is stored
    pub discard_after_save: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocatedImage {
    pub image: AcquiredImage,
    pub coordinates: Option<Coordinates>,
    pub place: PlaceName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    pub id: i64,
    pub place: PlaceName,
}

pub struct CapturePipeline<'a, S, L, G> {
    store: &'a ImageStore,
    source: &'a S,
    locator: &'a L,
    geocoder: &'a G,
    storage_dir: PathBuf,
}

impl<'a, S, L, G> CapturePipeline<'a, S, L, G>
where
    S: ImageSource,
    L: DeviceLocator,
    G: Geocoder,
{
    pub fn new(
        store: &'a ImageStore,
        source: &'a S,
        locator: &'a L,
        geocoder: &'a G,
        config: &GalleryConfig,
    ) -> Self {
        Self {
            store,
            source,
            locator,
            geocoder,
            storage_dir: config.storage_path.clone(),
        }
    }

    /// Runs all three stages
    pub async fn run(&self, mode: CaptureMode) -> Result<CaptureOutcome, CaptureError> {
        let acquired = self.acquire(mode).await?;
        let located = self.locate(acquired).await;
        self.persist(located)
    }

    /// Gets a photo from the source and imports it into gallery storage
    pub async fn acquire(&self, mode: CaptureMode) -> Result<AcquiredImage, CaptureError> {
        let picked = self.source.acquire(mode)?;
        log::debug!("Acquired {:?} image at {}", mode, picked.display());

        let imported = import_photo(&picked, &self.storage_dir).await?;

        Ok(AcquiredImage {
            path: imported.path,
            width: imported.width,
            height: imported.height,
            discard_after_save: (mode == CaptureMode::Camera).then_some(picked),
        })
    }

    /// Attaches the device position and its place name. Never fails.
    pub async fn locate(&self, image: AcquiredImage) -> LocatedImage {
        let coordinates = self.locator.current_location();
        let place = match coordinates {
            Some(_) => resolve_place(self.geocoder, coordinates).await,
            None => {
                log::warn!("No location available, saving without location data");
                PlaceName::Unresolved(UnresolvedReason::NoCoordinates)
            }
        };

        LocatedImage {
            image,
            coordinates,
            place,
        }
    }

    /// Writes the record. On success a camera capture's original is removed;
    /// on failure the imported copy is removed and the original kept.
    pub fn persist(&self, located: LocatedImage) -> Result<CaptureOutcome, CaptureError> {
        let uri = located.image.path.to_string_lossy().to_string();

        match self
            .store
            .insert_resolved(&uri, located.coordinates, &located.place)
        {
            Ok(id) => {
                if let Some(original) = &located.image.discard_after_save {
                    if let Err(e) = std::fs::remove_file(original) {
                        log::warn!("Could not remove original {}: {}", original.display(), e);
                    }
                }
                Ok(CaptureOutcome {
                    id,
                    place: located.place,
                })
            }
            Err(e) => {
                log::error!("Error saving image {}: {}", uri, e);
                if let Err(rm) = std::fs::remove_file(&located.image.path) {
                    log::warn!("Could not remove unsaved import {}: {}", uri, rm);
                }
                Err(CaptureError::Persist(e))
            }
        }
    }
}
