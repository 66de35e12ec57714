//! Map, routing and theming engine for the GeoPlanner events dashboard.
//!
//! This crate holds everything about the dashboard map that does not need a
//! browser: which map instance is live, which markers should be on it, which
//! route overlay is showing, what the address search last returned, and which
//! theme is active. The `client` crate implements the browser-facing traits
//! ([`surface::MapSurface`], [`theme_engine::StyleSurface`] and the service
//! traits) and feeds DOM and network events back in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::DashboardController`]: view mode, filters, and [`controller::Effect`]s for the host |
//! | [`lifecycle`] | Single-slot map instance manager with reserve/attach mounting |
//! | [`markers`] | Diff-based marker reconciliation against the filtered entity list |
//! | [`routing`] | Single route overlay with routed and straight-line fallbacks |
//! | [`geocode`] | Address search client and last-writer-wins suggestion state |
//! | [`theme`] | Static theme registry |
//! | [`theme_engine`] | Theme application state machine and style plans |
//! | [`tiles`] | Static map tile style registry |
//! | [`location`] | Own-location fixes and fallback |
//! | [`entity`] | Map entities and the category/search filter |
//! | [`surface`] | The `MapSurface` trait and the marker/polyline specs it draws |
//! | [`geo`] | Coordinates, bounds and great-circle distance |
//! | [`color`] | Hex color parsing and blending |
//! | [`config`] | Service endpoints and map defaults |
//! | [`error`] | Shared service error type |
//! | [`consts`] | Shared numeric constants (zoom levels, icon sizes, delays) |

pub mod color;
pub mod config;
pub mod consts;
pub mod controller;
pub mod entity;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod lifecycle;
pub mod location;
pub mod markers;
pub mod routing;
pub mod surface;
pub mod theme;
pub mod theme_engine;
pub mod tiles;

#[cfg(test)]
pub(crate) mod test_support;
