use super::*;
use geomap::geo::Coordinate;

fn entity(attendees: u32, max_attendees: u32, registered: bool) -> Entity {
    Entity {
        id: "7".to_owned(),
        title: "Trote".to_owned(),
        description: String::new(),
        category: "Deporte".to_owned(),
        organizer: "Ana".to_owned(),
        starts_at: "2026-03-01T08:00:00Z".to_owned(),
        attendees,
        max_attendees,
        waypoints: vec![Coordinate::new(10.6, -71.6)],
        saved: false,
        registered,
    }
}

#[test]
fn attendance_label_shows_count_and_limit() {
    assert_eq!(attendance_label(&entity(3, 10, false)), "3/10 asistentes");
}

#[test]
fn register_label_prefers_registered_over_full() {
    assert_eq!(register_label(&entity(3, 10, false)), "Inscribirme");
    assert_eq!(register_label(&entity(10, 10, false)), "Completo");
    assert_eq!(register_label(&entity(10, 10, true)), "Inscrito");
}

#[test]
fn starts_at_drops_seconds_and_zone() {
    assert_eq!(format_starts_at("2026-03-01T08:00:00Z"), "2026-03-01 08:00");
}

#[test]
fn starts_at_passes_through_unparseable_values() {
    assert_eq!(format_starts_at("mañana"), "mañana");
    assert_eq!(format_starts_at("2026-03-01T8"), "2026-03-01T8");
}
