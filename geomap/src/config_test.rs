#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_point_at_public_services() {
    let cfg = ServiceConfig::default();
    assert_eq!(cfg.geocode_base_url, "https://nominatim.openstreetmap.org");
    assert_eq!(cfg.routing_base_url, "https://router.project-osrm.org");
    assert_eq!(cfg.language, "es");
    assert_eq!(cfg.country_codes, "ve");
    assert_eq!(cfg.suggestion_limit, 5);
    assert_eq!(cfg.location_timeout_ms, 8_000);
    assert_eq!(cfg.default_zoom, 12.0);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = ServiceConfig::from_json(r#"{"language":"en","suggestion_limit":3}"#)
        .unwrap_or_else(|e| panic!("parse failed: {e}"));
    assert_eq!(cfg.language, "en");
    assert_eq!(cfg.suggestion_limit, 3);
    assert_eq!(cfg.country_codes, "ve");
    assert_eq!(cfg.default_center, Coordinate::fallback());
}

#[test]
fn wrong_field_type_is_an_error() {
    assert!(ServiceConfig::from_json(r#"{"suggestion_limit":"many"}"#).is_err());
}

#[test]
fn normalized_strips_trailing_slashes() {
    let cfg = ServiceConfig {
        api_base_url: "http://api.test//".to_owned(),
        routing_base_url: "https://osrm.test/".to_owned(),
        ..ServiceConfig::default()
    }
    .normalized();
    assert_eq!(cfg.api_base_url, "http://api.test");
    assert_eq!(cfg.routing_base_url, "https://osrm.test");
    assert_eq!(cfg.geocode_base_url, "https://nominatim.openstreetmap.org");
}
