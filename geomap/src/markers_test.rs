#![allow(clippy::float_cmp)]

use super::*;
use crate::lifecycle::{MapHandle, MapLifecycleManager};
use crate::test_support::{RecordingSurface, SharedLog, entity};

// =============================================================
// Helpers
// =============================================================

fn mounted() -> (MapLifecycleManager<RecordingSurface>, MapHandle, SharedLog) {
    let mut manager = MapLifecycleManager::default();
    let (surface, log) = RecordingSurface::new();
    let handle = manager.mount(surface).unwrap_or_else(|e| panic!("mount failed: {e}"));
    (manager, handle, log)
}

fn five_entities() -> Vec<Entity> {
    vec![
        entity("1", "Deporte", 10.60, -71.60),
        entity("2", "Social", 10.61, -71.61),
        entity("3", "Deporte", 10.62, -71.62),
        entity("4", "Cultural", 10.63, -71.63),
        entity("5", "Estudio", 10.64, -71.64),
    ]
}

fn displayed_keys(manager: &MapLifecycleManager<RecordingSurface>, handle: MapHandle) -> Vec<MarkerKey> {
    manager
        .instance(handle)
        .unwrap_or_else(|e| panic!("instance: {e}"))
        .marker_keys()
        .cloned()
        .collect()
}

// =============================================================
// Icon sizing
// =============================================================

#[test]
fn own_icon_scales_with_zoom_and_clamps() {
    assert_eq!(own_location_icon_px(2.0), 20);
    assert_eq!(own_location_icon_px(10.0), 30);
    assert_eq!(own_location_icon_px(12.0), 36);
    assert_eq!(own_location_icon_px(18.0), 50);
    assert_eq!(own_location_icon_px(f64::NAN), 20);
}

// =============================================================
// Specs
// =============================================================

#[test]
fn entity_spec_uses_category_palette_and_letter() {
    let spec = entity_marker_spec(&entity("1", "Cultural", 1.0, 2.0), false, None)
        .unwrap_or_else(|| panic!("spec expected"));
    assert_eq!(spec.position, Coordinate::new(1.0, 2.0));
    assert_eq!(
        spec.icon,
        MarkerIcon::Category { color: "#dc3545", letter: 'C', size_px: 30, highlighted: false }
    );
    assert_eq!(spec.popup.actions, vec![PopupAction::RouteHere, PopupAction::Save, PopupAction::Register]);
}

#[test]
fn unknown_category_gets_default_color() {
    let spec = entity_marker_spec(&entity("1", "Gastronomía", 1.0, 2.0), false, None)
        .unwrap_or_else(|| panic!("spec expected"));
    assert!(matches!(spec.icon, MarkerIcon::Category { color: "#6c757d", letter: 'G', .. }));
}

#[test]
fn entity_without_waypoints_has_no_marker() {
    let mut e = entity("1", "Social", 1.0, 2.0);
    e.waypoints.clear();
    assert!(entity_marker_spec(&e, false, None).is_none());
}

#[test]
fn saved_and_full_entities_drop_actions() {
    let mut e = entity("1", "Social", 1.0, 2.0);
    e.saved = true;
    e.attendees = 10;
    let spec = entity_marker_spec(&e, false, None).unwrap_or_else(|| panic!("spec expected"));
    assert_eq!(spec.popup.actions, vec![PopupAction::RouteHere]);
    assert!(matches!(spec.icon, MarkerIcon::Category { highlighted: true, .. }));
}

#[test]
fn distance_note_formats_km_and_minutes() {
    assert_eq!(distance_note(4_230.0, 610.0), "4.2 km (10 min)");
    assert_eq!(distance_note(950.0, 89.0), "0.9 km (1 min)");
}

// =============================================================
// Sync
// =============================================================

#[test]
fn filter_to_one_category_leaves_only_its_markers_plus_own_location() {
    let (mut manager, handle, log) = mounted();
    let sync = MarkerSynchronizer::new();
    let own = Some(Coordinate::new(10.65, -71.61));
    let all = five_entities();

    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    sync.sync(instance, &all, own);
    assert_eq!(instance.marker_count(), 6);

    let sports: Vec<Entity> = all.iter().filter(|e| e.category == "Deporte").cloned().collect();
    let report = sync.sync(instance, &sports, own);
    assert_eq!(report, SyncReport { added: 0, removed: 3, updated: 0, unchanged: 3 });

    assert_eq!(
        displayed_keys(&manager, handle),
        vec![
            MarkerKey::OwnLocation,
            MarkerKey::Entity("1".to_owned()),
            MarkerKey::Entity("3".to_owned()),
        ]
    );
    assert_eq!(log.borrow().markers.len(), 3);
}

#[test]
fn sync_converges_regardless_of_prior_state() {
    let sync = MarkerSynchronizer::new();
    let a = five_entities();
    let mut b = vec![a[1].clone(), a[4].clone(), entity("9", "Otro", 10.7, -71.7)];
    b[0].title = "Renamed".to_owned();

    // Path 1: A then B.
    let (mut m1, h1, log1) = mounted();
    let i1 = m1.instance_mut(h1).unwrap_or_else(|e| panic!("{e}"));
    sync.sync(i1, &a, None);
    sync.sync(i1, &b, None);

    // Path 2: B directly.
    let (mut m2, h2, log2) = mounted();
    let i2 = m2.instance_mut(h2).unwrap_or_else(|e| panic!("{e}"));
    sync.sync(i2, &b, None);

    let specs = |log: &SharedLog| {
        let mut v: Vec<String> = log.borrow().markers.values().map(|s| format!("{s:?}")).collect();
        v.sort();
        v
    };
    assert_eq!(specs(&log1), specs(&log2));
    assert_eq!(displayed_keys(&m1, h1), displayed_keys(&m2, h2));
    let expected: Vec<MarkerKey> = sync.markers_for(&b, None, 12.0).into_keys().collect();
    assert_eq!(displayed_keys(&m1, h1), expected);
}

#[test]
fn changed_entity_is_updated_in_place() {
    let (mut manager, handle, log) = mounted();
    let sync = MarkerSynchronizer::new();
    let mut list = five_entities();
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    sync.sync(instance, &list, None);
    let adds_before = log.borrow().ops.iter().filter(|op| *op == "add_marker").count();

    list[2].attendees = 3;
    let report = sync.sync(instance, &list, None);
    assert_eq!(report, SyncReport { added: 0, removed: 0, updated: 1, unchanged: 4 });
    let adds_after = log.borrow().ops.iter().filter(|op| *op == "add_marker").count();
    assert_eq!(adds_before, adds_after);
    assert_eq!(log.borrow().marker_updates, 1);
}

#[test]
fn identical_snapshot_touches_nothing() {
    let (mut manager, handle, log) = mounted();
    let sync = MarkerSynchronizer::new();
    let list = five_entities();
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    sync.sync(instance, &list, None);
    let ops = log.borrow().ops.len();
    let report = sync.sync(instance, &list, None);
    assert_eq!(report.unchanged, 5);
    assert_eq!(log.borrow().ops.len(), ops);
}

#[test]
fn removed_entities_detach_their_listeners() {
    let (mut manager, handle, log) = mounted();
    let sync = MarkerSynchronizer::new();
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    let map_listeners = log.borrow().live_listeners();

    sync.sync(instance, &five_entities(), None);
    assert_eq!(log.borrow().live_listeners(), map_listeners + 10);

    sync.sync(instance, &[], None);
    assert_eq!(log.borrow().live_listeners(), map_listeners);
    assert_eq!(instance.listener_count(), map_listeners);
}

#[test]
fn own_location_marker_has_no_listeners() {
    let (mut manager, handle, log) = mounted();
    let sync = MarkerSynchronizer::new();
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    let before = log.borrow().live_listeners();
    sync.sync(instance, &[], Some(Coordinate::fallback()));
    assert_eq!(instance.marker_count(), 1);
    assert_eq!(log.borrow().live_listeners(), before);
    let spec = instance.marker_spec(&MarkerKey::OwnLocation).unwrap_or_else(|| panic!("own marker"));
    assert_eq!(spec.popup.title, OWN_LOCATION_TITLE);
    assert_eq!(spec.icon, MarkerIcon::OwnLocation { size_px: 36 });
}

// =============================================================
// Zoom and decorations
// =============================================================

#[test]
fn zoom_end_resizes_only_own_marker() {
    let (mut manager, handle, log) = mounted();
    let sync = MarkerSynchronizer::new();
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    sync.sync(instance, &five_entities(), Some(Coordinate::fallback()));

    assert!(sync.on_zoom_end(instance, 15.0));
    assert_eq!(log.borrow().marker_updates, 1);
    assert_eq!(
        instance.marker_spec(&MarkerKey::OwnLocation).map(|s| s.icon.clone()),
        Some(MarkerIcon::OwnLocation { size_px: 45 })
    );
    assert!(!sync.on_zoom_end(instance, 15.0));
}

#[test]
fn zoom_end_without_own_marker_is_noop() {
    let (mut manager, handle, _log) = mounted();
    let sync = MarkerSynchronizer::new();
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    assert!(!sync.on_zoom_end(instance, 15.0));
}

#[test]
fn highlight_survives_resync() {
    let (mut manager, handle, _log) = mounted();
    let mut sync = MarkerSynchronizer::new();
    let list = five_entities();
    sync.sync(manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}")), &list, None);

    sync.highlight(manager.live_instance_mut(), &list[0]);
    assert!(sync.is_highlighted("1"));

    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    let report = sync.sync(instance, &list, None);
    assert_eq!(report.updated, 0);
    let key = MarkerKey::Entity("1".to_owned());
    assert!(matches!(
        instance.marker_spec(&key).map(|s| &s.icon),
        Some(MarkerIcon::Category { highlighted: true, .. })
    ));
}

#[test]
fn distance_note_is_appended_to_popup() {
    let (mut manager, handle, _log) = mounted();
    let mut sync = MarkerSynchronizer::new();
    let list = five_entities();
    sync.sync(manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}")), &list, None);

    sync.set_note(manager.live_instance_mut(), &list[1], "1.5 km (4 min)".to_owned());
    let instance = manager.instance(handle).unwrap_or_else(|e| panic!("{e}"));
    let popup = &instance
        .marker_spec(&MarkerKey::Entity("2".to_owned()))
        .unwrap_or_else(|| panic!("marker 2"))
        .popup;
    assert_eq!(popup.lines.last().map(String::as_str), Some("1.5 km (4 min)"));
}
