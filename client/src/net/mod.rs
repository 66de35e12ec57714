//! Networking adapters for the dashboard's external services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to the GeoPlanner REST API, `geocode` to Nominatim and
//! `routing` to OSRM. Each implements a `geomap` service trait so the
//! dashboard controller never sees HTTP. `types` defines the API wire schema.

pub mod api;
pub mod geocode;
pub mod routing;
pub mod types;
