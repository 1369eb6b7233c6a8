use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Label stored and shown for records whose place could not be resolved
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A WGS84 position as reported by the device
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` for non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Builds coordinates from the two nullable columns.
    /// A half-filled pair is treated as no position at all.
    pub fn from_columns(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon),
            _ => None,
        }
    }

    /// Short form used in detail views, e.g. "48.8566, 2.3522"
    pub fn display_short(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Why a place name is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The device reported no position
    NoCoordinates,
    /// Reverse geocoding failed or returned nothing
    LookupFailed,
}

/// Outcome of reverse geocoding
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceName {
    Resolved(String),
    Unresolved(UnresolvedReason),
}

impl PlaceName {
    /// The string written to the `location` column and shown in the UI
    pub fn label(&self) -> &str {
        match self {
            PlaceName::Resolved(name) => name,
            PlaceName::Unresolved(_) => UNKNOWN_LOCATION,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, PlaceName::Resolved(_))
    }
}

/// One persisted image entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRecord {
    pub id: i64,
    pub uri: String,
    pub coordinates: Option<Coordinates>,
    pub location: String,
    /// UTC, set once at insert
    pub timestamp: NaiveDateTime,
}

impl ImageRecord {
    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }

    /// File system path of the backing image
    pub fn path(&self) -> PathBuf {
        uri_to_path(&self.uri)
    }

    pub fn has_known_location(&self) -> bool {
        self.location != UNKNOWN_LOCATION
    }
}

impl<'r> TryFrom<&Row<'r>> for ImageRecord {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'r>) -> Result<Self, Self::Error> {
        let id: i64 = row.get(0)?;
        let uri: String = row.get(1)?;
        let latitude: Option<f64> = row.get(2)?;
        let longitude: Option<f64> = row.get(3)?;
        let location: Option<String> = row.get(4)?;
        let timestamp: NaiveDateTime = row.get(5)?;

        Ok(ImageRecord {
            id,
            uri,
            coordinates: Coordinates::from_columns(latitude, longitude),
            location: location.unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            timestamp,
        })
    }
}

/// Converts a `file://` URI or a plain path into a path
pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

/// Configuration for the gallery core
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Directory imported photos are copied into
    pub storage_path: PathBuf,
    /// Longest edge of the previews shown in the gallery grid
    pub preview_size: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("./photos"),
            preview_size: 256,
        }
    }
}
