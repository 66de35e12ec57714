//! Single-slot ownership of the live map instance.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard toggles between map and list views. Each entry into map view
//! mounts a map onto a fresh container; each exit tears it down. The mapping
//! library loads late, so mounting is split into [`MapLifecycleManager::reserve`]
//! (synchronous, on view entry) and [`MapLifecycleManager::attach`] (once the
//! library has produced a surface).
//!
//! DESIGN
//! ======
//! The manager holds one slot: empty, pending a ticket, or ready with an
//! instance. Each reservation gets a new generation number; tickets and
//! handles carry it, so an attach or an operation from a previous generation
//! is recognized and rejected. Markers, the route overlay and the search pin
//! live inside [`MapInstance`], so dropping the instance through
//! [`MapInstance::teardown`] removes everything the engine ever drew.

use std::collections::BTreeMap;

use crate::consts::{DEFAULT_ZOOM, SEARCH_PIN_PX, SEARCH_RESULT_ZOOM};
use crate::geo::{Bounds, Coordinate};
use crate::markers::{MarkerKey, PlacedMarker};
use crate::routing::{RouteKind, RouteOverlay};
use crate::surface::{
    EventTarget, LayerId, ListenerId, MapEventKind, MapSurface, MarkerIcon, MarkerSpec, PopupContent,
};
use crate::tiles::{TileStyle, default_tile_style};

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

/// Pin color for address search results.
pub const SEARCH_PIN_COLOR: &str = "#007bff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("a map instance is already mounted or pending")]
    AlreadyMounted,
    #[error("mount was cancelled before the map surface was ready")]
    Cancelled,
    #[error("map handle is stale or the map is not ready")]
    Stale,
}

/// Proof of a reservation; redeemed by [`MapLifecycleManager::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountTicket(u64);

/// Reference to a ready map instance of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle {
    generation: u64,
}

impl MapHandle {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// A mounted map plus everything drawn on it.
pub struct MapInstance<S> {
    pub(crate) surface: S,
    tile_layer: LayerId,
    tile_style: &'static TileStyle,
    map_listeners: Vec<ListenerId>,
    pub(crate) markers: BTreeMap<MarkerKey, PlacedMarker>,
    pub(crate) route: Option<RouteOverlay>,
    search_pin: Option<LayerId>,
}

impl<S: MapSurface> MapInstance<S> {
    fn open(mut surface: S, style: &'static TileStyle, center: Coordinate, zoom: f64) -> Self {
        let tile_layer = surface.add_tile_layer(style);
        surface.set_view(center, zoom);
        let map_listeners = vec![
            surface.listen(EventTarget::Map, MapEventKind::ZoomEnd),
            surface.listen(EventTarget::Map, MapEventKind::Click),
        ];
        Self {
            surface,
            tile_layer,
            tile_style: style,
            map_listeners,
            markers: BTreeMap::new(),
            route: None,
            search_pin: None,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.surface.zoom()
    }

    pub fn set_view(&mut self, center: Coordinate, zoom: f64) {
        self.surface.set_view(center, zoom);
    }

    /// Recenter without changing zoom.
    pub fn pan_to(&mut self, center: Coordinate) {
        let zoom = self.surface.zoom();
        self.surface.set_view(center, zoom);
    }

    pub fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32) {
        self.surface.fit_bounds(bounds, padding_px);
    }

    #[must_use]
    pub fn tile_style(&self) -> &'static TileStyle {
        self.tile_style
    }

    /// Swap the base imagery. The old layer is removed before the new one is added.
    pub fn set_tile_style(&mut self, style: &'static TileStyle) {
        if self.tile_style.key == style.key {
            return;
        }
        self.surface.remove_layer(self.tile_layer);
        self.tile_layer = self.surface.add_tile_layer(style);
        self.tile_style = style;
    }

    /// Drop a single pin at `at` and center on it, replacing any previous pin.
    pub fn show_search_pin(&mut self, at: Coordinate, label: &str) {
        self.clear_search_pin();
        let spec = MarkerSpec {
            position: at,
            icon: MarkerIcon::Pin { color: SEARCH_PIN_COLOR, size_px: SEARCH_PIN_PX },
            popup: PopupContent { title: label.to_owned(), ..PopupContent::default() },
        };
        self.search_pin = Some(self.surface.add_marker(&spec));
        self.surface.set_view(at, SEARCH_RESULT_ZOOM);
    }

    pub fn clear_search_pin(&mut self) {
        if let Some(layer) = self.search_pin.take() {
            self.surface.remove_layer(layer);
        }
    }

    #[must_use]
    pub fn has_search_pin(&self) -> bool {
        self.search_pin.is_some()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker_keys(&self) -> impl Iterator<Item = &MarkerKey> {
        self.markers.keys()
    }

    #[must_use]
    pub fn marker_spec(&self, key: &MarkerKey) -> Option<&MarkerSpec> {
        self.markers.get(key).map(|placed| &placed.spec)
    }

    /// Which marker a layer belongs to, for routing popup events.
    #[must_use]
    pub fn marker_for_layer(&self, layer: LayerId) -> Option<&MarkerKey> {
        self.markers
            .iter()
            .find_map(|(key, placed)| (placed.layer == layer).then_some(key))
    }

    #[must_use]
    pub fn route_points(&self) -> Option<&[Coordinate]> {
        self.route.as_ref().map(|route| route.points.as_slice())
    }

    #[must_use]
    pub fn route_kind(&self) -> Option<RouteKind> {
        self.route.as_ref().map(|route| route.kind)
    }

    /// Listeners this instance currently holds on its surface.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.map_listeners.len() + self.markers.values().map(|m| m.listeners.len()).sum::<usize>()
    }

    /// Remove every listener and layer, then destroy the surface.
    fn teardown(mut self) {
        for placed in std::mem::take(&mut self.markers).into_values() {
            for listener in placed.listeners {
                self.surface.unlisten(listener);
            }
            self.surface.remove_layer(placed.layer);
        }
        if let Some(route) = self.route.take() {
            self.surface.remove_layer(route.layer);
        }
        self.clear_search_pin();
        for listener in self.map_listeners.drain(..) {
            self.surface.unlisten(listener);
        }
        self.surface.remove_layer(self.tile_layer);
        self.surface.destroy();
    }
}

enum Slot<S> {
    Empty,
    Pending { generation: u64 },
    Ready { generation: u64, instance: MapInstance<S> },
}

/// Owner of the one live map instance.
pub struct MapLifecycleManager<S> {
    slot: Slot<S>,
    next_generation: u64,
    tile_style: &'static TileStyle,
    center: Coordinate,
    zoom: f64,
}

impl<S: MapSurface> Default for MapLifecycleManager<S> {
    fn default() -> Self {
        Self::new(Coordinate::fallback(), DEFAULT_ZOOM)
    }
}

impl<S: MapSurface> MapLifecycleManager<S> {
    /// Create a manager that opens maps at `center`/`zoom`.
    #[must_use]
    pub fn new(center: Coordinate, zoom: f64) -> Self {
        Self {
            slot: Slot::Empty,
            next_generation: 1,
            tile_style: default_tile_style(),
            center,
            zoom,
        }
    }

    /// Claim the slot for a map that will be attached later.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::AlreadyMounted`] if a map is pending or
    /// ready. This is a caller bug and also trips a debug assertion.
    pub fn reserve(&mut self) -> Result<MountTicket, LifecycleError> {
        let vacant = matches!(self.slot, Slot::Empty);
        debug_assert!(vacant, "map reserve while another map is live");
        if !vacant {
            return Err(LifecycleError::AlreadyMounted);
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        self.slot = Slot::Pending { generation };
        log::debug!("map reserved (generation {generation})");
        Ok(MountTicket(generation))
    }

    /// Bind a ready surface to a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Cancelled`] when the reservation was undone
    /// by an unmount in the meantime. The surface is destroyed before
    /// returning so no orphan map survives.
    pub fn attach(&mut self, ticket: MountTicket, mut surface: S) -> Result<MapHandle, LifecycleError> {
        let generation = match self.slot {
            Slot::Pending { generation } if generation == ticket.0 => generation,
            _ => {
                log::debug!("discarding map surface for cancelled generation {}", ticket.0);
                surface.destroy();
                return Err(LifecycleError::Cancelled);
            }
        };
        let instance = MapInstance::open(surface, self.tile_style, self.center, self.zoom);
        self.slot = Slot::Ready { generation, instance };
        log::debug!("map attached (generation {generation})");
        Ok(MapHandle { generation })
    }

    /// Reserve and attach in one step, for surfaces that are available synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::AlreadyMounted`] if a map is already live.
    pub fn mount(&mut self, surface: S) -> Result<MapHandle, LifecycleError> {
        let ticket = self.reserve()?;
        self.attach(ticket, surface)
    }

    /// Tear down the map of `handle`'s generation. No-op for stale handles.
    pub fn unmount(&mut self, handle: MapHandle) -> bool {
        if self.live_handle() != Some(handle) {
            return false;
        }
        self.teardown()
    }

    /// Tear down whatever occupies the slot, pending or ready. Idempotent.
    pub fn teardown(&mut self) -> bool {
        match std::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Empty => false,
            Slot::Pending { generation } => {
                log::debug!("map reservation cancelled (generation {generation})");
                true
            }
            Slot::Ready { generation, instance } => {
                instance.teardown();
                log::debug!("map unmounted (generation {generation})");
                true
            }
        }
    }

    #[must_use]
    pub fn live_handle(&self) -> Option<MapHandle> {
        match self.slot {
            Slot::Ready { generation, .. } => Some(MapHandle { generation }),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.slot, Slot::Pending { .. })
    }

    /// Whether `ticket` is still the reservation a surface may attach to.
    #[must_use]
    pub fn awaits(&self, ticket: MountTicket) -> bool {
        matches!(self.slot, Slot::Pending { generation } if generation == ticket.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.slot, Slot::Empty)
    }

    /// # Errors
    ///
    /// Returns [`LifecycleError::Stale`] unless `handle` names the ready instance.
    pub fn instance(&self, handle: MapHandle) -> Result<&MapInstance<S>, LifecycleError> {
        match &self.slot {
            Slot::Ready { generation, instance } if *generation == handle.generation => Ok(instance),
            _ => Err(LifecycleError::Stale),
        }
    }

    /// # Errors
    ///
    /// Returns [`LifecycleError::Stale`] unless `handle` names the ready instance.
    pub fn instance_mut(&mut self, handle: MapHandle) -> Result<&mut MapInstance<S>, LifecycleError> {
        match &mut self.slot {
            Slot::Ready { generation, instance } if *generation == handle.generation => Ok(instance),
            _ => Err(LifecycleError::Stale),
        }
    }

    /// Ready instance of any generation.
    #[must_use]
    pub fn live_instance(&self) -> Option<&MapInstance<S>> {
        match &self.slot {
            Slot::Ready { instance, .. } => Some(instance),
            _ => None,
        }
    }

    pub fn live_instance_mut(&mut self) -> Option<&mut MapInstance<S>> {
        match &mut self.slot {
            Slot::Ready { instance, .. } => Some(instance),
            _ => None,
        }
    }

    #[must_use]
    pub fn tile_style(&self) -> &'static TileStyle {
        self.tile_style
    }

    /// Remember `style` for future mounts and apply it to the live map.
    pub fn set_tile_style(&mut self, style: &'static TileStyle) {
        self.tile_style = style;
        if let Some(instance) = self.live_instance_mut() {
            instance.set_tile_style(style);
        }
    }
}
