use super::*;

const HOME: Coordinate = Coordinate::new(10.67, -71.63);

#[test]
fn live_fix_is_used_as_is() {
    let fix = resolve_fix(Ok(HOME), None, Coordinate::fallback());
    assert_eq!(fix, LocationFix { position: HOME, source: FixSource::Live });
    assert!(fix.is_live());
}

#[test]
fn denial_falls_back_to_default_center() {
    let fix = resolve_fix(Err(LocationError::Denied), None, Coordinate::fallback());
    assert_eq!(fix.position, Coordinate::fallback());
    assert_eq!(fix.source, FixSource::Fallback);
}

#[test]
fn failures_prefer_cached_position() {
    for error in [LocationError::Denied, LocationError::Timeout, LocationError::Unavailable] {
        let fix = resolve_fix(Err(error), LocationFix::cached(HOME), Coordinate::fallback());
        assert_eq!(fix, LocationFix { position: HOME, source: FixSource::Cached });
    }
}

#[test]
fn invalid_live_position_is_unavailable() {
    let fix = resolve_fix(Ok(Coordinate::new(f64::NAN, 0.0)), None, Coordinate::fallback());
    assert_eq!(fix.source, FixSource::Fallback);
}

#[test]
fn cached_rejects_invalid_positions() {
    assert!(LocationFix::cached(Coordinate::new(91.0, 0.0)).is_none());
    assert!(LocationFix::cached(HOME).is_some());
}

#[test]
fn platform_error_codes() {
    assert_eq!(LocationError::from_code(1), LocationError::Denied);
    assert_eq!(LocationError::from_code(2), LocationError::Unavailable);
    assert_eq!(LocationError::from_code(3), LocationError::Timeout);
}

#[test]
fn options_follow_config() {
    let config = ServiceConfig { location_timeout_ms: 5_000, ..ServiceConfig::default() };
    let options = LocationOptions::from_config(&config);
    assert_eq!(options.timeout_ms, 5_000);
    assert_eq!(options.max_age_ms, 300_000);
    assert!(options.high_accuracy);
    assert_eq!(LocationOptions::from_config(&ServiceConfig::default()).timeout_ms, 8_000);
}
