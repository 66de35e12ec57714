//! Own-location resolution.
//!
//! The browser geolocation call is made by the host with [`LocationOptions`];
//! its outcome comes back here and is turned into a [`LocationFix`]. Every
//! failure still yields a position: the last cached fix if there is one,
//! otherwise the configured default center.

use crate::config::ServiceConfig;
use crate::consts::LOCATION_MAX_AGE_MS;
use crate::geo::Coordinate;

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

/// Notice shown when an action needs the user's position and none is known.
pub const OWN_LOCATION_UNAVAILABLE: &str =
    "No se puede crear la ruta. Haz clic en el botón de ubicación (📍) para actualizar tu posición.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,
    #[error("location request timed out")]
    Timeout,
    #[error("location unavailable")]
    Unavailable,
}

impl LocationError {
    /// Map a `GeolocationPositionError.code` value.
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Denied,
            3 => Self::Timeout,
            _ => Self::Unavailable,
        }
    }
}

/// Where a position came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixSource {
    Live,
    /// Stored from an earlier session.
    Cached,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub position: Coordinate,
    pub source: FixSource,
}

impl LocationFix {
    #[must_use]
    pub fn cached(position: Coordinate) -> Option<Self> {
        position.is_valid().then_some(Self { position, source: FixSource::Cached })
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.source == FixSource::Live
    }
}

/// Options passed to the platform geolocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub max_age_ms: u32,
}

impl LocationOptions {
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self { high_accuracy: true, timeout_ms: config.location_timeout_ms, max_age_ms: LOCATION_MAX_AGE_MS }
    }
}

/// Turn a geolocation outcome into the position to display.
#[must_use]
pub fn resolve_fix(
    outcome: Result<Coordinate, LocationError>,
    cached: Option<LocationFix>,
    fallback: Coordinate,
) -> LocationFix {
    let error = match outcome {
        Ok(position) if position.is_valid() => return LocationFix { position, source: FixSource::Live },
        Ok(position) => {
            log::warn!("geolocation returned an invalid position {position:?}");
            LocationError::Unavailable
        }
        Err(e) => e,
    };
    if let Some(fix) = cached {
        log::warn!("own location not resolved ({error}), keeping cached position");
        return LocationFix { source: FixSource::Cached, ..fix };
    }
    log::warn!("own location not resolved ({error}), using default position");
    LocationFix { position: fallback, source: FixSource::Fallback }
}
