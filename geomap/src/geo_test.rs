#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Coordinate
// =============================================================

#[test]
fn fallback_is_maracaibo() {
    let c = Coordinate::fallback();
    assert_eq!(c.lat, 10.654);
    assert_eq!(c.lng, -71.612);
}

#[test]
fn valid_coordinates_accept_edges() {
    assert!(Coordinate::new(90.0, 180.0).is_valid());
    assert!(Coordinate::new(-90.0, -180.0).is_valid());
}

#[test]
fn invalid_coordinates_rejected() {
    assert!(!Coordinate::new(91.0, 0.0).is_valid());
    assert!(!Coordinate::new(0.0, -181.0).is_valid());
    assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
}

#[test]
fn distance_to_self_is_zero() {
    let c = Coordinate::new(10.5, -71.6);
    assert!(c.distance_m(c).abs() < 1e-6);
}

#[test]
fn one_degree_of_latitude_is_about_111_km() {
    let a = Coordinate::new(0.0, 0.0);
    let b = Coordinate::new(1.0, 0.0);
    let d = a.distance_m(b);
    assert!((d - 111_195.0).abs() < 50.0, "got {d}");
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_of_empty_slice_is_none() {
    assert!(Bounds::around(&[]).is_none());
}

#[test]
fn bounds_cover_all_points() {
    let pts = [Coordinate::new(10.0, -72.0), Coordinate::new(11.0, -71.0), Coordinate::new(10.5, -71.8)];
    let b = Bounds::around(&pts).unwrap_or_else(|| panic!("bounds expected"));
    assert_eq!(b.south_west, Coordinate::new(10.0, -72.0));
    assert_eq!(b.north_east, Coordinate::new(11.0, -71.0));
    assert!(pts.iter().all(|p| b.contains(*p)));
    assert!(!b.contains(Coordinate::new(12.0, -71.5)));
}

#[test]
fn path_length_sums_segments() {
    let a = Coordinate::new(0.0, 0.0);
    let b = Coordinate::new(1.0, 0.0);
    let c = Coordinate::new(2.0, 0.0);
    let total = path_length_m(&[a, b, c]);
    assert!((total - 2.0 * a.distance_m(b)).abs() < 1e-6);
    assert_eq!(path_length_m(&[a]), 0.0);
}
