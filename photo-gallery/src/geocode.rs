// Reverse geocoding: coordinates -> human readable place name
//
// Lookups are fail-soft. Callers get a `PlaceName` and never an error; failures
// are only logged.

use crate::models::{Coordinates, PlaceName, UnresolvedReason};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;

/// Error type for reverse geocoding
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeError {
    /// No geocoding backend is reachable or configured
    Unavailable(String),
    /// The backend answered but knows no place at these coordinates
    NoResult,
    Http(String),
    InvalidResponse(String),
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeError::Unavailable(msg) => write!(f, "Geocoding unavailable: {}", msg),
            GeocodeError::NoResult => write!(f, "No place found"),
            GeocodeError::Http(msg) => write!(f, "HTTP error: {}", msg),
            GeocodeError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for GeocodeError {}

#[cfg(feature = "nominatim")]
impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            GeocodeError::Unavailable(err.to_string())
        } else if err.is_decode() {
            GeocodeError::InvalidResponse(err.to_string())
        } else {
            GeocodeError::Http(err.to_string())
        }
    }
}

/// Turns coordinates into a place name
pub trait Geocoder {
    fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<String, GeocodeError>>;
}

/// Resolves the place for optional coordinates. Never fails.
pub async fn resolve_place<G: Geocoder>(
    geocoder: &G,
    coordinates: Option<Coordinates>,
) -> PlaceName {
    let Some(coordinates) = coordinates else {
        log::debug!("No coordinates, skipping reverse geocoding");
        return PlaceName::Unresolved(UnresolvedReason::NoCoordinates);
    };

    match geocoder.reverse_geocode(coordinates).await {
        Ok(name) if !name.trim().is_empty() => {
            log::debug!(
                "Resolved {} to '{}'",
                coordinates.display_short(),
                name.trim()
            );
            PlaceName::Resolved(name.trim().to_string())
        }
        Ok(_) => {
            log::warn!(
                "Reverse geocoding returned an empty name for {}",
                coordinates.display_short()
            );
            PlaceName::Unresolved(UnresolvedReason::LookupFailed)
        }
        Err(e) => {
            log::warn!(
                "Reverse geocoding failed for {}: {}",
                coordinates.display_short(),
                e
            );
            PlaceName::Unresolved(UnresolvedReason::LookupFailed)
        }
    }
}

/// Place label for a coordinate pair, "Unknown Location" on any failure
pub async fn location_name<G: Geocoder>(geocoder: &G, latitude: f64, longitude: f64) -> String {
    resolve_place(geocoder, Coordinates::new(latitude, longitude))
        .await
        .label()
        .to_string()
}

/// Geocoder for builds without network access
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

impl Geocoder for OfflineGeocoder {
    async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<String, GeocodeError> {
        Err(GeocodeError::Unavailable(
            "reverse geocoding disabled".to_string(),
        ))
    }
}

/// Settings for the OpenStreetMap Nominatim reverse endpoint
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent
    pub user_agent: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("geotag-gallery/", env!("CARGO_PKG_VERSION")).to_string(),
            language: "en".to_string(),
            timeout_secs: 10,
        }
    }
}

#[cfg(feature = "nominatim")]
pub use nominatim::NominatimGeocoder;

#[cfg(feature = "nominatim")]
mod nominatim {
    use super::*;
    use reqwest::Client;
    use std::time::Duration;

    /// Reverse geocoder backed by a Nominatim server
    #[derive(Debug, Clone)]
    pub struct NominatimGeocoder {
        client: Client,
        config: NominatimConfig,
    }

    impl NominatimGeocoder {
        pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
            let client = Client::builder()
                .user_agent(config.user_agent.clone())
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| GeocodeError::Unavailable(format!("HTTP client: {}", e)))?;

            Ok(Self { client, config })
        }

        fn reverse_url(&self, coordinates: Coordinates) -> Result<reqwest::Url, GeocodeError> {
            let endpoint = format!("{}/reverse", self.config.base_url.trim_end_matches('/'));
            let params = [
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("format", "jsonv2".to_string()),
                ("accept-language", self.config.language.clone()),
            ];
            reqwest::Url::parse_with_params(&endpoint, &params)
                .map_err(|e| GeocodeError::Unavailable(format!("Invalid base URL: {}", e)))
        }
    }

    impl Geocoder for NominatimGeocoder {
        async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<String, GeocodeError> {
            let url = self.reverse_url(coordinates)?;
            log::debug!("Nominatim reverse lookup: {}", url);

            let response = self.client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(GeocodeError::Http(format!(
                    "status {}",
                    response.status()
                )));
            }

            let json = response.json::<Value>().await?;
            place_from_response(&json)
        }
    }
}

/// Extracts a place name from a Nominatim `reverse` response.
///
/// Prefers "<locality>, <country>" and falls back to `display_name`.
pub fn place_from_response(json: &Value) -> Result<String, GeocodeError> {
    if json.get("error").is_some() {
        return Err(GeocodeError::NoResult);
    }
    if !json.is_object() {
        return Err(GeocodeError::InvalidResponse(
            "expected a JSON object".to_string(),
        ));
    }

    let address = &json["address"];
    let locality = ["city", "town", "village", "hamlet", "suburb", "county"]
        .iter()
        .find_map(|key| non_empty(&address[*key]));
    let country = non_empty(&address["country"]);

    let name = match (locality, country) {
        (Some(locality), Some(country)) => format!("{}, {}", locality, country),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => non_empty(&json["display_name"])
            .ok_or(GeocodeError::NoResult)?
            .to_string(),
    };

    Ok(name)
}

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubGeocoder(Result<String, GeocodeError>);

    impl Geocoder for StubGeocoder {
        async fn reverse_geocode(&self, _c: Coordinates) -> Result<String, GeocodeError> {
            self.0.clone()
        }
    }

    #[test]
    fn place_from_response_city_and_country() {
        let json_response = r#"
{
  "place_id": 88066702,
  "licence": "Data © OpenStreetMap contributors, ODbL 1.0. http://osm.org/copyright",
  "osm_type": "way",
  "lat": "48.8566",
  "lon": "2.3522",
  "category": "highway",
  "type": "pedestrian",
  "addresstype": "road",
  "name": "Place de l'Hôtel de Ville",
  "display_name": "Place de l'Hôtel de Ville, Quartier Saint-Merri, Paris, Île-de-France, France métropolitaine, 75004, France",
  "address": {
    "road": "Place de l'Hôtel de Ville",
    "quarter": "Quartier Saint-Merri",
    "suburb": "Paris 4e Arrondissement",
    "city": "Paris",
    "state": "Île-de-France",
    "postcode": "75004",
    "country": "France",
    "country_code": "fr"
  }
}
"#;
        let json: Value = serde_json::from_str(json_response).unwrap();

        assert_eq!(place_from_response(&json).unwrap(), "Paris, France");
    }

    #[test]
    fn place_from_response_town_fallback() {
        let json = serde_json::json!({
            "display_name": "Somewhere",
            "address": {"town": "Ebersberg", "country": "Deutschland"}
        });

        assert_eq!(place_from_response(&json).unwrap(), "Ebersberg, Deutschland");
    }

    #[test]
    fn place_from_response_display_name_fallback() {
        let json = serde_json::json!({
            "display_name": "North Atlantic Ocean",
            "address": {}
        });

        assert_eq!(place_from_response(&json).unwrap(), "North Atlantic Ocean");
    }

    #[test]
    fn place_from_response_error_payload() {
        let json = serde_json::json!({"error": "Unable to geocode"});

        assert_eq!(place_from_response(&json), Err(GeocodeError::NoResult));
    }

    #[test]
    fn place_from_response_not_an_object() {
        let json = serde_json::json!([1, 2]);

        assert!(matches!(
            place_from_response(&json),
            Err(GeocodeError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn resolve_place_without_coordinates() {
        let geocoder = StubGeocoder(Ok("Paris, France".to_string()));

        let place = resolve_place(&geocoder, None).await;

        assert_eq!(place, PlaceName::Unresolved(UnresolvedReason::NoCoordinates));
    }

    #[tokio::test]
    async fn resolve_place_failure_is_soft() {
        let geocoder = StubGeocoder(Err(GeocodeError::Http("status 503".to_string())));

        let place = resolve_place(&geocoder, Coordinates::new(48.8566, 2.3522)).await;

        assert_eq!(place, PlaceName::Unresolved(UnresolvedReason::LookupFailed));
        assert_eq!(place.label(), "Unknown Location");
    }

    #[tokio::test]
    async fn resolve_place_blank_name_is_unresolved() {
        let geocoder = StubGeocoder(Ok("   ".to_string()));

        let place = resolve_place(&geocoder, Coordinates::new(1.0, 1.0)).await;

        assert_eq!(place, PlaceName::Unresolved(UnresolvedReason::LookupFailed));
    }

    #[tokio::test]
    async fn location_name_uses_sentinel() {
        assert_eq!(
            location_name(&OfflineGeocoder, 48.8566, 2.3522).await,
            "Unknown Location"
        );

        let geocoder = StubGeocoder(Ok(" Paris, France ".to_string()));
        assert_eq!(
            location_name(&geocoder, 48.8566, 2.3522).await,
            "Paris, France"
        );
    }
}
