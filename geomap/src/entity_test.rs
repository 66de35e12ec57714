use super::*;
use crate::test_support::entity;

// =============================================================
// Entity / Category
// =============================================================

#[test]
fn anchor_is_first_waypoint() {
    let mut e = entity("1", "Deporte", 10.0, -71.0);
    e.waypoints.push(Coordinate::new(11.0, -72.0));
    assert_eq!(e.anchor(), Some(Coordinate::new(10.0, -71.0)));
    e.waypoints.clear();
    assert_eq!(e.anchor(), None);
}

#[test]
fn initial_is_uppercased_category_letter() {
    assert_eq!(entity("1", "deporte", 0.0, 0.0).initial(), 'D');
    assert_eq!(entity("1", "", 0.0, 0.0).initial(), '?');
}

#[test]
fn category_tags_are_case_insensitive() {
    assert_eq!(Category::from_tag("CULTURAL"), Category::Cultural);
    assert_eq!(Category::from_tag(" estudio "), Category::Estudio);
    assert_eq!(Category::from_tag("Concierto"), Category::Otro);
}

#[test]
fn category_palette() {
    assert_eq!(Category::Deporte.color(), "#28a745");
    assert_eq!(Category::Estudio.color(), "#007bff");
    assert_eq!(Category::Social.color(), "#ffc107");
    assert_eq!(Category::Cultural.color(), "#dc3545");
    assert_eq!(Category::Otro.color(), "#6c757d");
}

#[test]
fn full_when_attendance_reaches_cap() {
    let mut e = entity("1", "Social", 0.0, 0.0);
    e.attendees = 10;
    assert!(e.is_full());
    e.max_attendees = 0;
    assert!(!e.is_full());
}

// =============================================================
// Filter
// =============================================================

#[test]
fn category_filter_values() {
    assert_eq!(CategoryFilter::from_value("all"), CategoryFilter::All);
    assert_eq!(CategoryFilter::from_value(""), CategoryFilter::All);
    assert_eq!(CategoryFilter::from_value("Deporte"), CategoryFilter::Only("Deporte".to_owned()));
    assert_eq!(CategoryFilter::Only("Social".to_owned()).value(), "Social");
}

#[test]
fn default_filter_passes_everything() {
    let list = vec![entity("1", "Deporte", 0.0, 0.0), entity("2", "Social", 0.0, 0.0)];
    assert_eq!(EntityFilter::default().apply(&list).len(), 2);
}

#[test]
fn category_filter_is_exact() {
    let list = vec![
        entity("1", "Deporte", 0.0, 0.0),
        entity("2", "Social", 0.0, 0.0),
        entity("3", "Deporte", 0.0, 0.0),
    ];
    let filter = EntityFilter { category: CategoryFilter::Only("Deporte".to_owned()), ..EntityFilter::default() };
    let ids: Vec<_> = filter.apply(&list).into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn search_matches_title_description_organizer_and_category() {
    let mut a = entity("1", "Cultural", 0.0, 0.0);
    a.title = "Noche de Jazz".to_owned();
    let mut b = entity("2", "Deporte", 0.0, 0.0);
    b.organizer = "Club Ciclista".to_owned();
    let c = entity("3", "Estudio", 0.0, 0.0);
    let list = vec![a, b, c];

    let by = |term: &str| -> Vec<String> {
        EntityFilter { search: term.to_owned(), ..EntityFilter::default() }
            .apply(&list)
            .into_iter()
            .map(|e| e.id)
            .collect()
    };
    assert_eq!(by("JAZZ"), vec!["1"]);
    assert_eq!(by("ciclista"), vec!["2"]);
    assert_eq!(by("estudio"), vec!["3"]);
    assert_eq!(by("descripción del evento"), vec!["1", "2", "3"]);
    assert_eq!(by("   "), vec!["1", "2", "3"]);
}

#[test]
fn category_and_search_combine() {
    let mut a = entity("1", "Deporte", 0.0, 0.0);
    a.title = "Maratón".to_owned();
    let mut b = entity("2", "Social", 0.0, 0.0);
    b.title = "Maratón de cine".to_owned();
    let filter = EntityFilter {
        category: CategoryFilter::Only("Deporte".to_owned()),
        search: "maratón".to_owned(),
    };
    let ids: Vec<_> = filter.apply(&[a, b]).into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["1"]);
}
