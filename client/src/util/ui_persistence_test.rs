use super::*;

#[test]
fn style_accepts_json_and_bare_strings() {
    assert_eq!(decode_style("\"satellite\""), "satellite");
    assert_eq!(decode_style("hybrid_esri"), "hybrid_esri");
}

#[test]
fn location_round_trips_through_json() {
    let raw = serde_json::to_string(&Coordinate::new(10.66, -71.62)).expect("json");
    assert_eq!(raw, r#"{"lat":10.66,"lng":-71.62}"#);
    assert_eq!(decode_location(&raw), Some(Coordinate::new(10.66, -71.62)));
}

#[test]
fn invalid_stored_location_is_ignored() {
    assert_eq!(decode_location(r#"{"lat":123.0,"lng":0.0}"#), None);
    assert_eq!(decode_location("not json"), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn storage_is_empty_off_browser() {
    save_tile_style("satellite");
    save_location(Coordinate::new(1.0, 2.0));
    assert_eq!(load_tile_style(), None);
    assert_eq!(load_location(), None);
    assert_eq!(load_json::<String>(MAP_STYLE_KEY), None);
}
