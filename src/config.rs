use photo_gallery::{AndroidPickerConfig, Coordinates, GalleryConfig, NominatimConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional settings file in the app data directory
pub const CONFIG_FILE: &str = "gallery.toml";

/// App settings, read from `gallery.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Database file, relative to the app data directory
    pub database_file: String,
    /// Photo storage directory, relative to the app data directory
    pub photo_dir: String,
    pub preview_size: u32,
    pub splash_millis: u64,
    pub geocoding: GeocodingConfig,
    pub location: LocationConfig,
    pub picker: PickerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeocodingConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub nominatim: NominatimConfig,
}

/// Position reported where the platform has no location service (desktop)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    pub fallback_latitude: Option<f64>,
    pub fallback_longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickerConfig {
    pub main_activity_class: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_file: "gallery.db".to_string(),
            photo_dir: "photos".to_string(),
            preview_size: 256,
            splash_millis: 1500,
            geocoding: GeocodingConfig::default(),
            location: LocationConfig::default(),
            picker: PickerConfig::default(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            nominatim: NominatimConfig::default(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            main_activity_class: AndroidPickerConfig::default().main_activity_class,
        }
    }
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Loads `gallery.toml` from `data_dir`. A missing or broken file yields defaults.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {} found, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_toml(&contents) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }

    pub fn gallery_config(&self, data_dir: &Path) -> GalleryConfig {
        GalleryConfig {
            storage_path: data_dir.join(&self.photo_dir),
            preview_size: self.preview_size,
        }
    }

    pub fn picker_config(&self) -> AndroidPickerConfig {
        AndroidPickerConfig {
            main_activity_class: self.picker.main_activity_class.clone(),
            ..Default::default()
        }
    }

    pub fn fallback_location(&self) -> Option<Coordinates> {
        Coordinates::from_columns(
            self.location.fallback_latitude,
            self.location.fallback_longitude,
        )
    }
}
