use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, EARTH_RADIUS_M};

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// The map center used when no better position is known.
    #[must_use]
    pub const fn fallback() -> Self {
        Self::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG)
    }

    /// True when both axes are finite and inside their valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance in meters.
    #[must_use]
    pub fn distance_m(&self, other: Coordinate) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (other.lng - self.lng).to_radians();
        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn around(points: &[Coordinate]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self { south_west: *first, north_east: *first };
        for point in rest {
            bounds.south_west.lat = bounds.south_west.lat.min(point.lat);
            bounds.south_west.lng = bounds.south_west.lng.min(point.lng);
            bounds.north_east.lat = bounds.north_east.lat.max(point.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(point.lng);
        }
        Some(bounds)
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}

/// Total great-circle length of a polyline in meters.
#[must_use]
pub fn path_length_m(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|pair| pair[0].distance_m(pair[1])).sum()
}
