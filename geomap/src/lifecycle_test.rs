#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::SEARCH_RESULT_ZOOM;
use crate::markers::MarkerSynchronizer;
use crate::routing::RoutingCoordinator;
use crate::test_support::{RecordingSurface, entity, routed};
use crate::tiles::tile_style_or_default;

type Manager = MapLifecycleManager<RecordingSurface>;

// =============================================================
// Mount / unmount
// =============================================================

#[test]
fn mount_attaches_default_tiles_and_centers_on_fallback() {
    let mut manager = Manager::default();
    let (surface, log) = RecordingSurface::new();
    let handle = manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));

    let log = log.borrow();
    assert_eq!(log.tiles.values().copied().collect::<Vec<_>>(), vec!["openstreetmap"]);
    assert_eq!(log.view, Some((Coordinate::fallback(), 12.0)));
    assert_eq!(log.live_listeners(), 2);
    assert_eq!(manager.live_handle(), Some(handle));
}

#[test]
fn unmount_releases_everything() {
    let mut manager = Manager::default();
    let (surface, log) = RecordingSurface::new();
    let handle = manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));

    let mut routing = RoutingCoordinator::new();
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    MarkerSynchronizer::new().sync(
        instance,
        &[entity("1", "Social", 10.0, -71.0), entity("2", "Deporte", 10.1, -71.1)],
        Some(Coordinate::fallback()),
    );
    let req = routing
        .begin_route(handle, instance, &[Coordinate::fallback(), Coordinate::new(10.1, -71.1)])
        .unwrap_or_else(|e| panic!("{e}"));
    routing.finish_route(instance, &req, Ok(routed(&[Coordinate::fallback(), Coordinate::new(10.1, -71.1)])));
    instance.show_search_pin(Coordinate::new(10.2, -71.2), "Plaza");
    assert!(log.borrow().live_layers() > 1);

    assert!(manager.unmount(handle));
    let log = log.borrow();
    assert_eq!(log.live_layers(), 0);
    assert_eq!(log.live_listeners(), 0);
    assert!(log.destroyed);
    assert_eq!(log.ops.last().map(String::as_str), Some("destroy"));
    assert!(manager.is_empty());
}

#[test]
fn unmount_is_idempotent() {
    let mut manager = Manager::default();
    let (surface, _log) = RecordingSurface::new();
    let handle = manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));
    assert!(manager.unmount(handle));
    assert!(!manager.unmount(handle));
    assert!(!manager.teardown());
}

#[test]
fn mount_unmount_mount_leaves_exactly_one_instance() {
    let mut manager = Manager::default();
    let (first, first_log) = RecordingSurface::new();
    let h1 = manager.mount(first).unwrap_or_else(|e| panic!("{e}"));
    manager.unmount(h1);
    let (second, second_log) = RecordingSurface::new();
    let h2 = manager.mount(second).unwrap_or_else(|e| panic!("{e}"));

    assert_ne!(h1, h2);
    assert!(first_log.borrow().destroyed);
    assert_eq!(first_log.borrow().live_listeners(), 0);
    assert!(!second_log.borrow().destroyed);
    assert_eq!(manager.live_handle(), Some(h2));
    assert_eq!(manager.instance(h1).err(), Some(LifecycleError::Stale));
}

#[test]
fn stale_handle_cannot_unmount_new_instance() {
    let mut manager = Manager::default();
    let (first, _) = RecordingSurface::new();
    let h1 = manager.mount(first).unwrap_or_else(|e| panic!("{e}"));
    manager.unmount(h1);
    let (second, second_log) = RecordingSurface::new();
    let h2 = manager.mount(second).unwrap_or_else(|e| panic!("{e}"));

    assert!(!manager.unmount(h1));
    assert!(!second_log.borrow().destroyed);
    assert_eq!(manager.live_handle(), Some(h2));
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "map reserve while another map is live")]
fn double_mount_asserts_in_debug() {
    let mut manager = Manager::default();
    let (a, _) = RecordingSurface::new();
    let (b, _) = RecordingSurface::new();
    manager.mount(a).unwrap_or_else(|e| panic!("{e}"));
    let _ = manager.mount(b);
}

#[cfg(not(debug_assertions))]
#[test]
fn double_mount_is_rejected_in_release() {
    let mut manager = Manager::default();
    let (a, _) = RecordingSurface::new();
    let (b, b_log) = RecordingSurface::new();
    manager.mount(a).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(manager.mount(b), Err(LifecycleError::AlreadyMounted));
    assert_eq!(b_log.borrow().live_layers(), 0);
}

// =============================================================
// Reserve / attach
// =============================================================

#[test]
fn reserve_then_attach() {
    let mut manager = Manager::default();
    let ticket = manager.reserve().unwrap_or_else(|e| panic!("{e}"));
    assert!(manager.is_pending());
    assert!(manager.live_handle().is_none());

    let (surface, _) = RecordingSurface::new();
    let handle = manager.attach(ticket, surface).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(manager.live_handle(), Some(handle));
}

#[test]
fn attach_after_cancel_destroys_surface() {
    let mut manager = Manager::default();
    let ticket = manager.reserve().unwrap_or_else(|e| panic!("{e}"));
    assert!(manager.teardown());

    let (surface, log) = RecordingSurface::new();
    assert_eq!(manager.attach(ticket, surface), Err(LifecycleError::Cancelled));
    assert!(log.borrow().destroyed);
    assert_eq!(log.borrow().live_layers(), 0);
    assert!(manager.is_empty());
}

#[test]
fn attach_with_old_ticket_after_remount_is_cancelled() {
    let mut manager = Manager::default();
    let old = manager.reserve().unwrap_or_else(|e| panic!("{e}"));
    manager.teardown();
    let fresh = manager.reserve().unwrap_or_else(|e| panic!("{e}"));

    let (late, late_log) = RecordingSurface::new();
    assert_eq!(manager.attach(old, late), Err(LifecycleError::Cancelled));
    assert!(late_log.borrow().destroyed);
    assert!(manager.is_pending());

    let (surface, _) = RecordingSurface::new();
    assert!(manager.attach(fresh, surface).is_ok());
}

#[test]
fn only_the_current_reservation_is_awaited() {
    let mut manager = Manager::default();
    let old = manager.reserve().unwrap_or_else(|e| panic!("{e}"));
    assert!(manager.awaits(old));
    manager.teardown();
    assert!(!manager.awaits(old));

    let fresh = manager.reserve().unwrap_or_else(|e| panic!("{e}"));
    assert!(!manager.awaits(old));
    assert!(manager.awaits(fresh));

    let (surface, _) = RecordingSurface::new();
    assert!(manager.attach(fresh, surface).is_ok());
    assert!(!manager.awaits(fresh));
}

#[test]
fn operations_on_pending_map_are_stale() {
    let mut manager = Manager::default();
    let (surface, _) = RecordingSurface::new();
    let handle = manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));
    manager.unmount(handle);
    manager.reserve().unwrap_or_else(|e| panic!("{e}"));
    assert!(manager.instance_mut(handle).is_err());
    assert!(manager.live_instance_mut().is_none());
}

// =============================================================
// Tiles and search pin
// =============================================================

#[test]
fn tile_switch_removes_old_before_adding_new() {
    let mut manager = Manager::default();
    let (surface, log) = RecordingSurface::new();
    manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));
    let ops_before = log.borrow().ops.len();

    manager.set_tile_style(tile_style_or_default("satellite"));
    let log = log.borrow();
    assert_eq!(&log.ops[ops_before..], &["remove_layer".to_owned(), "add_tile:satellite".to_owned()]);
    assert_eq!(log.tiles.len(), 1);
}

#[test]
fn same_tile_style_is_noop() {
    let mut manager = Manager::default();
    let (surface, log) = RecordingSurface::new();
    manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));
    let ops_before = log.borrow().ops.len();
    manager.set_tile_style(tile_style_or_default("openstreetmap"));
    assert_eq!(log.borrow().ops.len(), ops_before);
}

#[test]
fn chosen_tile_style_applies_to_next_mount() {
    let mut manager = Manager::default();
    manager.set_tile_style(tile_style_or_default("hybrid_esri"));
    let (surface, log) = RecordingSurface::new();
    manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(log.borrow().tiles.values().copied().collect::<Vec<_>>(), vec!["hybrid_esri"]);
}

#[test]
fn search_pin_is_replaced_not_duplicated() {
    let mut manager = Manager::default();
    let (surface, log) = RecordingSurface::new();
    let handle = manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));

    instance.show_search_pin(Coordinate::new(10.0, -71.0), "Uno");
    instance.show_search_pin(Coordinate::new(10.5, -71.5), "Dos");
    assert_eq!(log.borrow().markers.len(), 1);
    assert_eq!(log.borrow().view, Some((Coordinate::new(10.5, -71.5), SEARCH_RESULT_ZOOM)));

    instance.clear_search_pin();
    assert!(!instance.has_search_pin());
    assert!(log.borrow().markers.is_empty());
}

#[test]
fn pan_to_keeps_zoom() {
    let mut manager = Manager::default();
    let (surface, log) = RecordingSurface::new();
    let handle = manager.mount(surface).unwrap_or_else(|e| panic!("{e}"));
    let instance = manager.instance_mut(handle).unwrap_or_else(|e| panic!("{e}"));
    instance.set_view(Coordinate::fallback(), 14.0);
    instance.pan_to(Coordinate::new(10.7, -71.7));
    assert_eq!(log.borrow().view, Some((Coordinate::new(10.7, -71.7), 14.0)));
}
