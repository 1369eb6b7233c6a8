use crate::config::AppConfig;
use crate::error::AppError;
use photo_gallery::{
    CaptureMode, CaptureOutcome, CapturePipeline, Coordinates, GalleryConfig, GeocodeError,
    Geocoder, ImageRecord, ImageStore, NominatimGeocoder, OfflineGeocoder, PlatformImageSource,
    PlatformLocator,
};
use std::path::Path;
use std::time::Duration;

/// Geocoder chosen from the settings
pub enum AppGeocoder {
    Nominatim(NominatimGeocoder),
    Offline(OfflineGeocoder),
}

impl AppGeocoder {
    pub fn from_config(config: &AppConfig) -> Self {
        if !config.geocoding.enabled {
            log::info!("Reverse geocoding disabled in settings");
            return AppGeocoder::Offline(OfflineGeocoder);
        }
        match NominatimGeocoder::new(config.geocoding.nominatim.clone()) {
            Ok(geocoder) => AppGeocoder::Nominatim(geocoder),
            Err(e) => {
                log::warn!("Falling back to offline geocoding: {}", e);
                AppGeocoder::Offline(OfflineGeocoder)
            }
        }
    }
}

impl Geocoder for AppGeocoder {
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<String, GeocodeError> {
        match self {
            AppGeocoder::Nominatim(g) => g.reverse_geocode(coordinates).await,
            AppGeocoder::Offline(g) => g.reverse_geocode(coordinates).await,
        }
    }
}

/// Everything the screens need, constructed once at startup
pub struct GalleryServices {
    store: ImageStore,
    gallery: GalleryConfig,
    source: PlatformImageSource,
    locator: PlatformLocator,
    geocoder: AppGeocoder,
    splash: Duration,
}

impl GalleryServices {
    /// Opens the store; `initialize()` must be called before use
    pub fn open(config: &AppConfig, data_dir: &Path) -> Result<Self, AppError> {
        let store = ImageStore::open(config.database_path(data_dir))?;

        Ok(Self {
            store,
            gallery: config.gallery_config(data_dir),
            source: PlatformImageSource::new(config.picker_config()),
            locator: PlatformLocator::new(config.picker_config())
                .with_fallback(config.fallback_location()),
            geocoder: AppGeocoder::from_config(config),
            splash: Duration::from_millis(config.splash_millis),
        })
    }

    /// Ensures the schema exists and returns the number of stored images
    pub fn initialize(&self) -> Result<i64, AppError> {
        self.store.initialize()?;
        Ok(self.store.count()?)
    }

    pub fn preview_size(&self) -> u32 {
        self.gallery.preview_size
    }

    pub fn has_camera_permission(&self) -> bool {
        self.source.has_camera_permission()
    }

    /// How long the splash screen stays up after a successful start
    pub fn splash_duration(&self) -> Duration {
        self.splash
    }

    /// Takes or picks a photo, locates it and saves it
    pub async fn capture(&self, mode: CaptureMode) -> Result<CaptureOutcome, AppError> {
        let pipeline = CapturePipeline::new(
            &self.store,
            &self.source,
            &self.locator,
            &self.geocoder,
            &self.gallery,
        );
        let outcome = pipeline.run(mode).await?;
        if !outcome.place.is_resolved() {
            log::warn!("Image {} saved without a place name", outcome.id);
        }
        log::info!(
            "Image processed and saved as {} ({})",
            outcome.id,
            outcome.place.label()
        );
        Ok(outcome)
    }

    /// All images newest first, or those whose place contains `query`
    pub fn list(&self, query: &str) -> Result<Vec<ImageRecord>, AppError> {
        let query = query.trim();
        let records = if query.is_empty() {
            self.store.list_all()?
        } else {
            self.store.search_by_location(query)?
        };
        Ok(records)
    }

    pub fn get(&self, id: i64) -> Result<ImageRecord, AppError> {
        self.store
            .get_by_id(id)?
            .ok_or_else(|| AppError::NotFound(format!("Image {}", id)))
    }

    /// Deletes the record and its file; `false` if it was already gone
    pub fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.store.delete_by_id(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photo_gallery::{CaptureError, StoreError};

    fn offline_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.geocoding.enabled = false;
        config
    }

    #[test]
    fn test_open_and_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let services = GalleryServices::open(&offline_config(), dir.path()).unwrap();

        assert!(matches!(
            services.list(""),
            Err(AppError::Storage(StoreError::NotInitialized))
        ));

        assert_eq!(services.initialize().unwrap(), 0);
        #[cfg(not(target_os = "android"))]
        assert!(!services.has_camera_permission());
        assert!(dir.path().join("gallery.db").exists());
        assert!(services.list("").unwrap().is_empty());
        assert!(services.list("Paris").unwrap().is_empty());
    }

    #[test]
    fn test_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let services = GalleryServices::open(&offline_config(), dir.path()).unwrap();
        services.initialize().unwrap();

        assert!(matches!(services.get(42), Err(AppError::NotFound(_))));
        assert!(!services.delete(42).unwrap());
    }

    #[cfg(not(target_os = "android"))]
    #[tokio::test]
    async fn test_capture_without_camera_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let services = GalleryServices::open(&offline_config(), dir.path()).unwrap();
        services.initialize().unwrap();

        let result = services.capture(CaptureMode::Camera).await;

        assert!(matches!(
            result,
            Err(AppError::Capture(CaptureError::Acquire(_)))
        ));
        assert!(services.list("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_geocoder_is_unavailable() {
        let geocoder = AppGeocoder::from_config(&offline_config());
        let result = geocoder
            .reverse_geocode(Coordinates::new(48.8566, 2.3522).unwrap())
            .await;
        assert!(matches!(result, Err(GeocodeError::Unavailable(_))));
    }
}
