use super::*;

#[test]
fn default_style_is_openstreetmap() {
    let style = default_tile_style();
    assert_eq!(style.key, "openstreetmap");
    assert_eq!(style.attribution, "© OpenStreetMap contributors");
}

#[test]
fn lookup_by_key() {
    assert_eq!(tile_style("satellite").map(|s| s.name), Some("Vista Satelital"));
    assert_eq!(tile_style("hybrid_esri").map(|s| s.attribution), Some("© Esri"));
    assert!(tile_style("watercolor").is_none());
}

#[test]
fn unknown_key_falls_back_to_default() {
    assert_eq!(tile_style_or_default("watercolor").key, DEFAULT_TILE_STYLE);
}

#[test]
fn keys_are_unique() {
    for (i, a) in TILE_STYLES.iter().enumerate() {
        for b in &TILE_STYLES[i + 1..] {
            assert_ne!(a.key, b.key);
        }
    }
}

#[test]
fn tile_url_expands_template_and_rotates_subdomains() {
    let osm = default_tile_style();
    assert_eq!(osm.tile_url(12, 1000, 2000), "https://a.tile.openstreetmap.org/12/1000/2000.png");
    assert_eq!(osm.tile_url(12, 1000, 2001), "https://b.tile.openstreetmap.org/12/1000/2001.png");
}

#[test]
fn esri_url_uses_row_before_column() {
    let sat = tile_style_or_default("satellite");
    assert!(sat.tile_url(5, 7, 9).ends_with("/tile/5/9/7"));
}
