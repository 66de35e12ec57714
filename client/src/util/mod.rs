//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, DOM style,
//! geolocation, the Leaflet bridge) from page and component logic.

pub mod dom_style;
pub mod geolocation;
#[cfg(feature = "hydrate")]
pub mod leaflet;
pub mod marker_html;
pub mod ui_persistence;
