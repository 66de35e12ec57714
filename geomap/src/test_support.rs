//! In-crate fakes for the surface and service traits.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use crate::entity::{Entity, EntityService};
use crate::error::ServiceError;
use crate::geo::{Bounds, Coordinate};
use crate::geocode::{GeocodeQuery, GeocodeService, Place, Suggestion};
use crate::routing::{RoutePath, RouteService};
use crate::surface::{EventTarget, LayerId, ListenerId, MapEventKind, MapSurface, MarkerSpec, PolylineStyle};
use crate::theme_engine::{PreferenceService, StyleSurface};
use crate::tiles::TileStyle;

// =============================================================
// Map surface
// =============================================================

#[derive(Debug, Default)]
pub struct SurfaceLog {
    next_id: u64,
    pub tiles: BTreeMap<LayerId, &'static str>,
    pub markers: BTreeMap<LayerId, MarkerSpec>,
    pub polylines: BTreeMap<LayerId, (Vec<Coordinate>, PolylineStyle)>,
    pub listeners: BTreeMap<ListenerId, (EventTarget, MapEventKind)>,
    pub view: Option<(Coordinate, f64)>,
    pub fitted: Vec<Bounds>,
    pub marker_updates: usize,
    pub destroyed: bool,
    pub ops: Vec<String>,
}

impl SurfaceLog {
    pub fn live_layers(&self) -> usize {
        self.tiles.len() + self.markers.len() + self.polylines.len()
    }

    pub fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type SharedLog = Rc<RefCell<SurfaceLog>>;

/// Map surface that records every call into a shared log.
pub struct RecordingSurface {
    log: SharedLog,
}

impl RecordingSurface {
    pub fn new() -> (Self, SharedLog) {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl MapSurface for RecordingSurface {
    fn add_tile_layer(&mut self, style: &TileStyle) -> LayerId {
        let mut log = self.log.borrow_mut();
        let id = LayerId(log.next());
        log.tiles.insert(id, style.key);
        log.ops.push(format!("add_tile:{}", style.key));
        id
    }

    fn add_marker(&mut self, spec: &MarkerSpec) -> LayerId {
        let mut log = self.log.borrow_mut();
        let id = LayerId(log.next());
        log.markers.insert(id, spec.clone());
        log.ops.push("add_marker".to_owned());
        id
    }

    fn update_marker(&mut self, layer: LayerId, spec: &MarkerSpec) {
        let mut log = self.log.borrow_mut();
        assert!(log.markers.contains_key(&layer), "update of unknown marker {layer:?}");
        log.markers.insert(layer, spec.clone());
        log.marker_updates += 1;
    }

    fn add_polyline(&mut self, points: &[Coordinate], style: &PolylineStyle) -> LayerId {
        let mut log = self.log.borrow_mut();
        let id = LayerId(log.next());
        log.polylines.insert(id, (points.to_vec(), *style));
        log.ops.push("add_polyline".to_owned());
        id
    }

    fn remove_layer(&mut self, layer: LayerId) {
        let mut log = self.log.borrow_mut();
        let removed = log.tiles.remove(&layer).is_some()
            || log.markers.remove(&layer).is_some()
            || log.polylines.remove(&layer).is_some();
        assert!(removed, "removal of unknown layer {layer:?}");
        log.ops.push("remove_layer".to_owned());
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        self.log.borrow_mut().view = Some((center, zoom));
    }

    fn fit_bounds(&mut self, bounds: Bounds, _padding_px: u32) {
        self.log.borrow_mut().fitted.push(bounds);
    }

    fn zoom(&self) -> f64 {
        self.log.borrow().view.map_or(0.0, |(_, zoom)| zoom)
    }

    fn listen(&mut self, target: EventTarget, kind: MapEventKind) -> ListenerId {
        let mut log = self.log.borrow_mut();
        let id = ListenerId(log.next());
        log.listeners.insert(id, (target, kind));
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        let mut log = self.log.borrow_mut();
        assert!(log.listeners.remove(&listener).is_some(), "unlisten of unknown {listener:?}");
    }

    fn destroy(&mut self) {
        let mut log = self.log.borrow_mut();
        assert!(!log.destroyed, "surface destroyed twice");
        log.destroyed = true;
        log.ops.push("destroy".to_owned());
    }
}

// =============================================================
// Style surface
// =============================================================

#[derive(Debug, Default)]
pub struct RecordingStyle {
    pub variables: BTreeMap<String, String>,
    pub root_attribute: Option<String>,
    pub writes: usize,
}

impl StyleSurface for RecordingStyle {
    fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_owned(), value.to_owned());
        self.writes += 1;
    }

    fn set_day_night(&mut self, value: &str) {
        self.root_attribute = Some(value.to_owned());
        self.writes += 1;
    }
}

// =============================================================
// Services
// =============================================================

/// Router answering from a queue of scripted outcomes.
#[derive(Default)]
pub struct ScriptedRouter {
    pub outcomes: RefCell<VecDeque<Result<RoutePath, ServiceError>>>,
    pub calls: RefCell<Vec<Vec<Coordinate>>>,
}

impl ScriptedRouter {
    pub fn with(outcomes: Vec<Result<RoutePath, ServiceError>>) -> Self {
        Self { outcomes: RefCell::new(outcomes.into()), calls: RefCell::default() }
    }
}

impl RouteService for ScriptedRouter {
    async fn route(&self, waypoints: &[Coordinate]) -> Result<RoutePath, ServiceError> {
        self.calls.borrow_mut().push(waypoints.to_vec());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ServiceError::Transport("no scripted outcome".to_owned())))
    }
}

/// Geocoder that counts calls and answers with a fixed result.
pub struct CountingGeocoder {
    pub calls: Cell<usize>,
    pub queries: RefCell<Vec<GeocodeQuery>>,
    pub result: Result<Vec<Suggestion>, ServiceError>,
}

impl CountingGeocoder {
    pub fn answering(result: Result<Vec<Suggestion>, ServiceError>) -> Self {
        Self { calls: Cell::new(0), queries: RefCell::default(), result }
    }
}

impl GeocodeService for CountingGeocoder {
    async fn search(&self, query: &GeocodeQuery) -> Result<Vec<Suggestion>, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        self.queries.borrow_mut().push(query.clone());
        self.result.clone()
    }

    async fn reverse(&self, _at: Coordinate, _language: &str) -> Result<Place, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        Ok(Place { locality: Some("Maracaibo".to_owned()), country: Some("Venezuela".to_owned()) })
    }
}

/// Preference store that records writes and optionally fails.
#[derive(Default)]
pub struct RecordingPreferences {
    pub stored: RefCell<Option<String>>,
    pub writes: RefCell<Vec<String>>,
    pub fail: bool,
}

impl PreferenceService for RecordingPreferences {
    async fn preferred_theme(&self) -> Result<Option<String>, ServiceError> {
        if self.fail {
            return Err(ServiceError::Status(500));
        }
        Ok(self.stored.borrow().clone())
    }

    async fn set_preferred_theme(&self, name: &str) -> Result<(), ServiceError> {
        self.writes.borrow_mut().push(name.to_owned());
        if self.fail {
            return Err(ServiceError::Status(503));
        }
        *self.stored.borrow_mut() = Some(name.to_owned());
        Ok(())
    }
}

/// Entity backend answering list calls from a queue.
#[derive(Default)]
pub struct ScriptedEntities {
    pub lists: RefCell<VecDeque<Result<Vec<Entity>, ServiceError>>>,
    pub saved: RefCell<Vec<String>>,
    pub registered: RefCell<Vec<String>>,
    pub fail_actions: bool,
}

impl EntityService for ScriptedEntities {
    async fn list(&self) -> Result<Vec<Entity>, ServiceError> {
        self.lists.borrow_mut().pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn save(&self, id: &str) -> Result<(), ServiceError> {
        self.saved.borrow_mut().push(id.to_owned());
        if self.fail_actions { Err(ServiceError::Status(500)) } else { Ok(()) }
    }

    async fn register(&self, id: &str) -> Result<(), ServiceError> {
        self.registered.borrow_mut().push(id.to_owned());
        if self.fail_actions { Err(ServiceError::Status(409)) } else { Ok(()) }
    }
}

// =============================================================
// Fixtures
// =============================================================

pub fn entity(id: &str, category: &str, lat: f64, lng: f64) -> Entity {
    Entity {
        id: id.to_owned(),
        title: format!("Evento {id}"),
        description: format!("Descripción del evento {id}"),
        category: category.to_owned(),
        organizer: "Ana".to_owned(),
        starts_at: "2026-11-01T18:00:00".to_owned(),
        attendees: 0,
        max_attendees: 10,
        waypoints: vec![Coordinate::new(lat, lng)],
        saved: false,
        registered: false,
    }
}

pub fn routed(points: &[Coordinate]) -> RoutePath {
    RoutePath { points: points.to_vec(), distance_m: 4_200.0, duration_s: 600.0 }
}
