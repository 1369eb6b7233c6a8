//! # Photo Gallery
//!
//! Core of a geotagged photo gallery: capture or pick a photo, tag it with a
//! reverse geocoded place name and keep it in a local SQLite store.
//!
//! - [`store::ImageStore`]: the image record table (create, list, delete, search)
//! - [`geocode`]: reverse geocoding, fail-soft, with a Nominatim backend
//! - [`location`]: current device position
//! - [`pipeline::CapturePipeline`]: `acquire -> locate -> persist`
//! - [`picker`]: platform camera / library access (Android over JNI)
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_gallery::{
//!     CaptureMode, CapturePipeline, FixedLocator, GalleryConfig, ImageStore, OfflineGeocoder,
//!     PlatformImageSource,
//! };
//!
//! let store = ImageStore::open("./data/gallery.db")?;
//! store.initialize()?;
//!
//! let config = GalleryConfig::default();
//! let source = PlatformImageSource::default();
//! let locator = FixedLocator(None);
//! let pipeline = CapturePipeline::new(&store, &source, &locator, &OfflineGeocoder, &config);
//! let outcome = pipeline.run(CaptureMode::Camera).await?;
//! ```

pub mod geocode;
pub mod import;
pub mod location;
pub mod models;
pub mod picker;
pub mod pipeline;
pub mod schema;
pub mod store;
pub mod thumbnail;

pub use geocode::{
    location_name, place_from_response, resolve_place, GeocodeError, Geocoder, NominatimConfig,
    OfflineGeocoder,
};
#[cfg(feature = "nominatim")]
pub use geocode::NominatimGeocoder;
pub use import::{import_photo, ImportError, ImportedPhoto};
pub use location::{DeviceLocator, FixedLocator, PlatformLocator};
pub use models::{
    Coordinates, GalleryConfig, ImageRecord, PlaceName, UnresolvedReason, UNKNOWN_LOCATION,
};
pub use picker::{AndroidPickerConfig, PickerError};
pub use pipeline::{
    AcquiredImage, CaptureError, CaptureMode, CaptureOutcome, CapturePipeline, ImageSource,
    LocatedImage, PlatformImageSource,
};
pub use schema::init_image_schema;
pub use store::{ImageStore, StoreError};
pub use thumbnail::{load_preview, original_data_url, preview_data_url, ThumbnailError};
