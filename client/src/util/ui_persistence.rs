//! Browser localStorage helpers for dashboard preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize hydrate-only read/write behavior so the dashboard
//! can remember the base map style and the last own-location fix across
//! visits without repeating web-sys glue. Off the browser every read misses
//! and every write is dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

use geomap::geo::Coordinate;

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

/// Key of the selected tile style.
pub const MAP_STYLE_KEY: &str = "geoplanner_map_style";

/// Key of the last own-location fix.
pub const LOCATION_KEY: &str = "geoplanner_user_location";

/// Load a raw string from `localStorage` for `key`.
pub fn load_raw(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        storage.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    decode(&load_raw(key)?)
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("localStorage write failed for {key}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw).ok()
}

/// Older builds stored the style key as a bare string; accept both.
fn decode_style(raw: &str) -> String {
    decode::<String>(raw).unwrap_or_else(|| raw.trim().to_owned())
}

/// Stored location as written by [`save_location`]; invalid fixes are ignored.
fn decode_location(raw: &str) -> Option<Coordinate> {
    decode::<Coordinate>(raw).filter(Coordinate::is_valid)
}

pub fn load_tile_style() -> Option<String> {
    load_raw(MAP_STYLE_KEY).map(|raw| decode_style(&raw)).filter(|key| !key.is_empty())
}

pub fn save_tile_style(key: &str) {
    save_json(MAP_STYLE_KEY, &key);
}

pub fn load_location() -> Option<Coordinate> {
    decode_location(&load_raw(LOCATION_KEY)?)
}

pub fn save_location(at: Coordinate) {
    save_json(LOCATION_KEY, &at);
}
