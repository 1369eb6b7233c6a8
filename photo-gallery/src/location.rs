use crate::models::Coordinates;
use crate::picker::{self, AndroidPickerConfig, PickerError};

/// Source of the device's current position.
///
/// A missing permission or an unavailable service is a normal outcome and
/// is reported as `None`, never as an error.
pub trait DeviceLocator {
    fn current_location(&self) -> Option<Coordinates>;
}

/// Locator that always reports the same position (desktop builds, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocator(pub Option<Coordinates>);

impl DeviceLocator for FixedLocator {
    fn current_location(&self) -> Option<Coordinates> {
        self.0
    }
}

/// Locator backed by the platform location service
#[derive(Debug, Clone, Default)]
pub struct PlatformLocator {
    config: AndroidPickerConfig,
    /// Used when the platform has no location service at all
    fallback: Option<Coordinates>,
}

impl PlatformLocator {
    pub fn new(config: AndroidPickerConfig) -> Self {
        Self {
            config,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Option<Coordinates>) -> Self {
        self.fallback = fallback;
        self
    }
}

impl DeviceLocator for PlatformLocator {
    fn current_location(&self) -> Option<Coordinates> {
        match picker::current_location_with_config(&self.config) {
            Ok(Some((lat, lon))) => {
                let coordinates = Coordinates::new(lat, lon);
                if coordinates.is_none() {
                    log::warn!("Ignoring invalid device position {}, {}", lat, lon);
                }
                coordinates
            }
            Ok(None) => {
                log::info!("Location permission not granted");
                None
            }
            Err(PickerError::PlatformNotSupported(_)) => self.fallback,
            Err(e) => {
                log::warn!("Location unavailable: {}", e);
                None
            }
        }
    }
}
