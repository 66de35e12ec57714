//! Service endpoints and map defaults.
//!
//! DESIGN
//! ======
//! Every field has a serde default so a partial JSON document (or none at all)
//! yields a working configuration pointed at the public OSM services.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZOOM, LOCATION_TIMEOUT_MS, SUGGESTION_LIMIT};
use crate::geo::Coordinate;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the entity/profile REST API.
    pub api_base_url: String,
    /// Nominatim-compatible geocoder base URL.
    pub geocode_base_url: String,
    /// OSRM-compatible router base URL.
    pub routing_base_url: String,
    /// Language sent to the geocoder (`Accept-Language`).
    pub language: String,
    /// Comma-separated ISO country codes the geocoder is scoped to.
    pub country_codes: String,
    pub suggestion_limit: u32,
    pub location_timeout_ms: u32,
    pub default_center: Coordinate,
    pub default_zoom: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_owned(),
            geocode_base_url: "https://nominatim.openstreetmap.org".to_owned(),
            routing_base_url: "https://router.project-osrm.org".to_owned(),
            language: "es".to_owned(),
            country_codes: "ve".to_owned(),
            suggestion_limit: SUGGESTION_LIMIT,
            location_timeout_ms: LOCATION_TIMEOUT_MS,
            default_center: Coordinate::fallback(),
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

impl ServiceConfig {
    /// Parse a JSON document, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the document is not valid JSON or a
    /// present field has the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Strip trailing slashes so endpoint builders can join with `/`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for url in [&mut self.api_base_url, &mut self.geocode_base_url, &mut self.routing_base_url] {
            while url.ends_with('/') {
                url.pop();
            }
        }
        self
    }
}
