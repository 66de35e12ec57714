//! Dashboard orchestration.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`DashboardController`] is the one owner of dashboard map state: view mode,
//! filter, the entity snapshot, own location, and the map, marker, routing,
//! search and theme components. The host feeds it user input, surface events
//! and service answers. Anything that needs the browser or the network comes
//! back as an [`Effect`] for the host to carry out; the answer is then handed
//! to the matching `finish_*` method.
//!
//! CONCURRENCY
//! ===========
//! Everything runs on one thread. The async helpers at the bottom of this
//! module hold the controller in a `RefCell` and only borrow it between
//! awaits, so a slow service call never blocks other events. Every answer is
//! checked against what is still current (map generation, route ticket,
//! search and snapshot sequence) before it touches the map.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::iter;

use crate::config::ServiceConfig;
use crate::entity::{CategoryFilter, Entity, EntityFilter, EntityService};
use crate::error::ServiceError;
use crate::geo::Coordinate;
use crate::geocode::{
    AddressSearch, FAILED_MESSAGE, GeocodeClient, GeocodeService, Place, Resolved, Suggestion, SuggestionState,
};
use crate::lifecycle::{LifecycleError, MapHandle, MapInstance, MapLifecycleManager, MountTicket};
use crate::location::{FixSource, LocationError, LocationFix, OWN_LOCATION_UNAVAILABLE, resolve_fix};
use crate::markers::{MarkerKey, MarkerSynchronizer, distance_note};
use crate::routing::{
    DraftMode, RouteDraft, RouteError, RoutePath, RouteRequest, RouteService, RouteSummary, RoutingCoordinator,
};
use crate::surface::{LayerId, MapEvent, MapSurface, PopupAction};
use crate::theme::Theme;
use crate::theme_engine::{PreferenceService, StylePlan, StyleSurface, ThemeEngine, ThemeState};
use crate::tiles::{TileStyle, tile_style};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Map(#[from] LifecycleError),
    #[error(transparent)]
    Route(#[from] RouteError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

/// A message for the user, raised at the moment of the action that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    OwnLocationUnavailable,
    AddressNotFound,
    SearchFailed,
    Saved,
    SaveFailed,
    Registered,
    RegisterFailed,
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::OwnLocationUnavailable => OWN_LOCATION_UNAVAILABLE,
            Self::AddressNotFound => "No se encontró la dirección.",
            Self::SearchFailed => FAILED_MESSAGE,
            Self::Saved => "Evento guardado en tu agenda.",
            Self::SaveFailed => "No se pudo guardar el evento.",
            Self::Registered => "Inscripción realizada.",
            Self::RegisterFailed => "No se pudo completar la inscripción.",
        }
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        !matches!(self, Self::Saved | Self::Registered)
    }
}

/// Work the host performs on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Create a map surface in the viewport and pass it to
    /// [`DashboardController::attach_map`] with this ticket.
    MountMap(MountTicket),
    /// Ask the platform for the user's position.
    ResolveLocation,
    ReverseGeocode(Coordinate),
    Route(RouteRequest),
    /// Fetch a route summary for an entity popup.
    FetchDistance { entity_id: String, waypoints: Vec<Coordinate> },
    SaveEntity(String),
    RegisterEntity(String),
    PersistTheme(&'static str),
    /// Run the region pass after the deferral delay, if still current.
    ScheduleRegionPass(StylePlan),
    StoreTileStyle(&'static str),
    StoreLocation(Coordinate),
}

pub struct DashboardController<S> {
    fallback: Coordinate,
    lifecycle: MapLifecycleManager<S>,
    markers: MarkerSynchronizer,
    routing: RoutingCoordinator,
    themes: ThemeEngine,
    search: AddressSearch,
    draft: RouteDraft,
    drafting: bool,
    view: ViewMode,
    filter: EntityFilter,
    entities: Vec<Entity>,
    /// Saved this session; the entity feed does not report saves.
    saved: BTreeSet<String>,
    snapshot_seq: u64,
    own_location: Option<LocationFix>,
    place: Option<String>,
    notices: Vec<Notice>,
}

impl<S: MapSurface> DashboardController<S> {
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            fallback: config.default_center,
            lifecycle: MapLifecycleManager::new(config.default_center, config.default_zoom),
            markers: MarkerSynchronizer::new(),
            routing: RoutingCoordinator::new(),
            themes: ThemeEngine::new(),
            search: AddressSearch::new(),
            draft: RouteDraft::default(),
            drafting: false,
            view: ViewMode::default(),
            filter: EntityFilter::default(),
            entities: Vec::new(),
            saved: BTreeSet::new(),
            snapshot_seq: 0,
            own_location: None,
            place: None,
            notices: Vec::new(),
        }
    }

    // =============================================================
    // View mode and map lifecycle
    // =============================================================

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    /// Switch views. Entering map view with no map reserves one; leaving it
    /// tears the map down along with any pending mount.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Vec<Effect> {
        self.view = mode;
        match mode {
            ViewMode::List => {
                self.close_map();
                Vec::new()
            }
            ViewMode::Map if self.lifecycle.is_empty() => match self.lifecycle.reserve() {
                Ok(ticket) => vec![Effect::MountMap(ticket), Effect::ResolveLocation],
                Err(e) => {
                    log::warn!("map mount skipped: {e}");
                    Vec::new()
                }
            },
            ViewMode::Map => Vec::new(),
        }
    }

    /// Bind the surface created for `ticket` and draw the current markers.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Cancelled`] when the view was left before the
    /// surface was ready; the surface has been destroyed.
    pub fn attach_map(&mut self, ticket: MountTicket, surface: S) -> Result<MapHandle, LifecycleError> {
        let handle = self.lifecycle.attach(ticket, surface)?;
        self.resync();
        Ok(handle)
    }

    /// Whether a surface created for `ticket` would still be accepted.
    #[must_use]
    pub fn awaits_mount(&self, ticket: MountTicket) -> bool {
        self.lifecycle.awaits(ticket)
    }

    /// The viewport element went away without a view change.
    pub fn host_gone(&mut self) {
        self.close_map();
    }

    fn close_map(&mut self) {
        self.lifecycle.teardown();
        self.routing.reset();
        self.draft.clear();
        self.drafting = false;
    }

    #[must_use]
    pub fn live_handle(&self) -> Option<MapHandle> {
        self.lifecycle.live_handle()
    }

    #[must_use]
    pub fn map(&self) -> Option<&MapInstance<S>> {
        self.lifecycle.live_instance()
    }

    // =============================================================
    // Entities and filter
    // =============================================================

    /// Start a refresh; only the answer carrying the latest sequence is applied.
    pub fn begin_refresh(&mut self) -> u64 {
        self.snapshot_seq += 1;
        self.snapshot_seq
    }

    /// Replace the entity snapshot if `seq` is the latest refresh.
    pub fn apply_snapshot(&mut self, seq: u64, entities: Vec<Entity>) -> bool {
        if seq != self.snapshot_seq {
            log::debug!("dropping superseded entity snapshot {seq}");
            return false;
        }
        self.entities = entities;
        for entity in &mut self.entities {
            entity.saved |= self.saved.contains(&entity.id);
        }
        self.resync();
        true
    }

    pub fn set_entities(&mut self, entities: Vec<Entity>) {
        let seq = self.begin_refresh();
        self.apply_snapshot(seq, entities);
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[must_use]
    pub fn filter(&self) -> &EntityFilter {
        &self.filter
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
        self.resync();
    }

    pub fn set_search_text(&mut self, text: &str) {
        text.clone_into(&mut self.filter.search);
        self.resync();
    }

    /// Entities passing the current filter, in snapshot order.
    #[must_use]
    pub fn visible_entities(&self) -> Vec<Entity> {
        self.filter.apply(&self.entities)
    }

    fn own_position(&self) -> Option<Coordinate> {
        self.own_location.map(|fix| fix.position)
    }

    fn resync(&mut self) {
        let own = self.own_position();
        let visible = self.filter.apply(&self.entities);
        if let Some(instance) = self.lifecycle.live_instance_mut() {
            self.markers.sync(instance, &visible, own);
        }
    }

    // =============================================================
    // Own location
    // =============================================================

    /// Seed own location from a stored fix. Ignored once a position is known.
    pub fn use_cached_location(&mut self, at: Coordinate) -> bool {
        if self.own_location.is_some() {
            return false;
        }
        let Some(fix) = LocationFix::cached(at) else {
            return false;
        };
        self.own_location = Some(fix);
        self.resync();
        true
    }

    /// Record a geolocation outcome. Without a map only the position is kept.
    pub fn location_resolved(&mut self, outcome: Result<Coordinate, LocationError>) -> Vec<Effect> {
        let known = self.own_location.filter(|fix| fix.source != FixSource::Fallback);
        let fix = resolve_fix(outcome, known, self.fallback);
        self.own_location = Some(fix);
        self.resync();
        if fix.is_live() {
            vec![Effect::StoreLocation(fix.position), Effect::ReverseGeocode(fix.position)]
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn own_location(&self) -> Option<LocationFix> {
        self.own_location
    }

    pub fn place_resolved(&mut self, outcome: Result<Place, ServiceError>) {
        match outcome {
            Ok(place) => self.place = place.label(),
            Err(e) => log::warn!("reverse geocode failed: {e}"),
        }
    }

    /// Locality of the own location, e.g. `"Maracaibo, Venezuela"`.
    #[must_use]
    pub fn place_label(&self) -> Option<&str> {
        self.place.as_deref()
    }

    /// Recenter on the own location, keeping zoom.
    pub fn center_on_me(&mut self) -> bool {
        let Some(at) = self.own_position() else {
            self.notices.push(Notice::OwnLocationUnavailable);
            return false;
        };
        match self.lifecycle.live_instance_mut() {
            Some(instance) => {
                instance.pan_to(at);
                true
            }
            None => false,
        }
    }

    // =============================================================
    // Surface events
    // =============================================================

    /// Dispatch an event raised by the surface of `handle`. Events from a
    /// map that is no longer live are dropped.
    pub fn handle_map_event(&mut self, handle: MapHandle, event: MapEvent) -> Vec<Effect> {
        let own = self.own_position();
        let Ok(instance) = self.lifecycle.instance_mut(handle) else {
            log::debug!("ignoring {:?} from a stale map", event.kind());
            return Vec::new();
        };
        match event {
            MapEvent::ZoomEnd { zoom } => {
                self.markers.on_zoom_end(instance, zoom);
                Vec::new()
            }
            MapEvent::Click { at } => {
                if !self.drafting {
                    return Vec::new();
                }
                let Some(points) = self.draft.pick(at) else {
                    return Vec::new();
                };
                route_effect(self.routing.begin_route(handle, instance, &points))
            }
            MapEvent::PopupOpen { layer } => {
                let Some(entity) = entity_for_layer(instance, layer, &self.entities) else {
                    return Vec::new();
                };
                match (own, entity.anchor()) {
                    (Some(from), Some(to)) if self.markers.note(&entity.id).is_none() => {
                        vec![Effect::FetchDistance { entity_id: entity.id.clone(), waypoints: vec![from, to] }]
                    }
                    _ => Vec::new(),
                }
            }
            MapEvent::PopupAction { layer, action } => {
                let Some(entity) = entity_for_layer(instance, layer, &self.entities) else {
                    return Vec::new();
                };
                match action {
                    PopupAction::RouteHere => {
                        let Some(from) = own else {
                            self.notices.push(Notice::OwnLocationUnavailable);
                            return Vec::new();
                        };
                        let points: Vec<Coordinate> = iter::once(from).chain(entity.waypoints.iter().copied()).collect();
                        route_effect(self.routing.begin_route(handle, instance, &points))
                    }
                    PopupAction::Save => vec![Effect::SaveEntity(entity.id.clone())],
                    PopupAction::Register if entity.is_full() => Vec::new(),
                    PopupAction::Register => vec![Effect::RegisterEntity(entity.id.clone())],
                }
            }
        }
    }

    // =============================================================
    // Routes
    // =============================================================

    /// Replace the route overlay with a request for `points`.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::Stale`] without a live map, or
    /// [`RouteError::TooFewPoints`] for fewer than two points.
    pub fn create_route(&mut self, points: &[Coordinate]) -> Result<RouteRequest, DashboardError> {
        let handle = self.lifecycle.live_handle().ok_or(LifecycleError::Stale)?;
        let instance = self.lifecycle.instance_mut(handle)?;
        Ok(self.routing.begin_route(handle, instance, points)?)
    }

    /// Draw the router's answer if its map and request are still current.
    pub fn finish_route(
        &mut self,
        request: &RouteRequest,
        outcome: Result<RoutePath, ServiceError>,
    ) -> Option<RouteSummary> {
        match self.lifecycle.instance_mut(request.map()) {
            Ok(instance) => self.routing.finish_route(instance, request, outcome),
            Err(_) => {
                log::debug!("dropping route answer for map generation {}", request.map().generation());
                None
            }
        }
    }

    /// Remove the overlay and any drafted points. Markers stay.
    pub fn clear_route(&mut self) -> bool {
        self.draft.clear();
        match self.lifecycle.live_instance_mut() {
            Some(instance) => self.routing.clear_route(instance),
            None => {
                self.routing.reset();
                false
            }
        }
    }

    #[must_use]
    pub fn is_route_pending(&self) -> bool {
        self.routing.is_pending()
    }

    /// Map clicks add route points until [`Self::stop_drafting`].
    pub fn start_drafting(&mut self, mode: DraftMode) {
        self.draft.set_mode(mode);
        self.draft.clear();
        self.drafting = true;
    }

    pub fn stop_drafting(&mut self) {
        self.drafting = false;
        self.draft.clear();
    }

    #[must_use]
    pub fn is_drafting(&self) -> bool {
        self.drafting
    }

    #[must_use]
    pub fn draft(&self) -> &RouteDraft {
        &self.draft
    }

    /// Drop the last drafted point and reroute what remains.
    pub fn undo_pick(&mut self) -> Vec<Effect> {
        let remaining = self.draft.undo();
        let Some(handle) = self.lifecycle.live_handle() else {
            return Vec::new();
        };
        let Ok(instance) = self.lifecycle.instance_mut(handle) else {
            return Vec::new();
        };
        match remaining {
            Some(points) => route_effect(self.routing.begin_route(handle, instance, &points)),
            None => {
                self.routing.clear_route(instance);
                Vec::new()
            }
        }
    }

    /// Put a distance summary into the entity's popup.
    pub fn finish_distance(&mut self, entity_id: &str, outcome: Result<RoutePath, ServiceError>) -> bool {
        let path = match outcome {
            Ok(path) => path,
            Err(e) => {
                log::warn!("distance to {entity_id} unavailable: {e}");
                return false;
            }
        };
        let Some(entity) = self.entities.iter().find(|e| e.id == entity_id) else {
            return false;
        };
        let note = distance_note(path.distance_m, path.duration_s);
        self.markers.set_note(self.lifecycle.live_instance_mut(), entity, note);
        true
    }

    // =============================================================
    // Entity actions
    // =============================================================

    pub fn finish_save(&mut self, entity_id: &str, outcome: Result<(), ServiceError>) {
        match outcome {
            Ok(()) => {
                self.saved.insert(entity_id.to_owned());
                if let Some(entity) = self.entities.iter_mut().find(|e| e.id == entity_id) {
                    entity.saved = true;
                }
                self.highlight(entity_id);
                self.notices.push(Notice::Saved);
            }
            Err(e) => {
                log::warn!("saving {entity_id} failed: {e}");
                self.notices.push(Notice::SaveFailed);
            }
        }
    }

    pub fn finish_register(&mut self, entity_id: &str, outcome: Result<(), ServiceError>) {
        match outcome {
            Ok(()) => {
                if let Some(entity) = self.entities.iter_mut().find(|e| e.id == entity_id) {
                    entity.registered = true;
                }
                self.highlight(entity_id);
                self.notices.push(Notice::Registered);
            }
            Err(e) => {
                log::warn!("registration for {entity_id} failed: {e}");
                self.notices.push(Notice::RegisterFailed);
            }
        }
    }

    fn highlight(&mut self, entity_id: &str) {
        if let Some(entity) = self.entities.iter().find(|e| e.id == entity_id) {
            self.markers.highlight(self.lifecycle.live_instance_mut(), entity);
        }
    }

    #[must_use]
    pub fn is_highlighted(&self, entity_id: &str) -> bool {
        self.markers.is_highlighted(entity_id)
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // =============================================================
    // Address search
    // =============================================================

    /// Register typed input. Returns the sequence to search under, or `None`
    /// when the query is too short to send.
    pub fn search_input(&mut self, text: &str) -> Option<u64> {
        self.search.begin(text)
    }

    pub fn search_results(&mut self, seq: u64, result: Result<Vec<Suggestion>, ServiceError>) -> bool {
        self.search.complete(seq, result)
    }

    #[must_use]
    pub fn suggestions(&self) -> &SuggestionState {
        self.search.state()
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    /// Pin and center on a chosen suggestion; the suggestion list closes.
    pub fn select_suggestion(&mut self, suggestion: &Suggestion) -> bool {
        self.search.clear();
        match self.lifecycle.live_instance_mut() {
            Some(instance) => {
                instance.show_search_pin(suggestion.position, &suggestion.label);
                true
            }
            None => false,
        }
    }

    /// Handle the answer to a submitted address.
    pub fn address_resolved(&mut self, outcome: Result<Resolved, ServiceError>) -> bool {
        match outcome {
            Ok(Resolved::Found(suggestion)) => self.select_suggestion(&suggestion),
            Ok(Resolved::NotFound) => {
                self.notices.push(Notice::AddressNotFound);
                false
            }
            Err(e) => {
                log::warn!("address lookup failed: {e}");
                self.notices.push(Notice::SearchFailed);
                false
            }
        }
    }

    pub fn clear_search_pin(&mut self) {
        if let Some(instance) = self.lifecycle.live_instance_mut() {
            instance.clear_search_pin();
        }
    }

    // =============================================================
    // Tiles
    // =============================================================

    /// Switch base imagery by key. Unknown keys are ignored.
    pub fn set_tile_style(&mut self, key: &str) -> Option<Effect> {
        let Some(style) = tile_style(key) else {
            log::warn!("unknown tile style {key:?}");
            return None;
        };
        self.lifecycle.set_tile_style(style);
        Some(Effect::StoreTileStyle(style.key))
    }

    /// Reapply a stored choice without storing it again.
    pub fn restore_tile_style(&mut self, key: &str) -> bool {
        match tile_style(key) {
            Some(style) => {
                self.lifecycle.set_tile_style(style);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn tile_style(&self) -> &'static TileStyle {
        self.lifecycle.tile_style()
    }

    // =============================================================
    // Theme
    // =============================================================

    pub fn begin_theme_load(&mut self) -> bool {
        self.themes.begin_loading()
    }

    pub fn theme_loaded<T: StyleSurface>(
        &mut self,
        surface: &mut T,
        stored: Result<Option<String>, ServiceError>,
    ) -> Option<Effect> {
        self.themes.finish_loading(surface, stored).map(Effect::ScheduleRegionPass)
    }

    /// Apply an explicit choice and ask for it to be persisted.
    pub fn select_theme<T: StyleSurface>(&mut self, surface: &mut T, name: &str) -> Vec<Effect> {
        let plan = self.themes.apply(surface, name);
        let key = plan.theme;
        vec![Effect::ScheduleRegionPass(plan), Effect::PersistTheme(key)]
    }

    /// Whether a deferred region pass should still run.
    #[must_use]
    pub fn region_pass_due(&self, plan: &StylePlan) -> bool {
        self.themes.is_current(plan)
    }

    #[must_use]
    pub fn active_theme(&self) -> &'static Theme {
        self.themes.active()
    }

    #[must_use]
    pub fn theme_state(&self) -> ThemeState {
        self.themes.state()
    }
}

fn route_effect(request: Result<RouteRequest, RouteError>) -> Vec<Effect> {
    match request {
        Ok(request) => vec![Effect::Route(request)],
        Err(e) => {
            log::warn!("route not requested: {e}");
            Vec::new()
        }
    }
}

fn entity_for_layer<'a, S: MapSurface>(
    instance: &MapInstance<S>,
    layer: LayerId,
    entities: &'a [Entity],
) -> Option<&'a Entity> {
    match instance.marker_for_layer(layer) {
        Some(MarkerKey::Entity(id)) => entities.iter().find(|e| e.id == *id),
        _ => None,
    }
}

// =============================================================
// Async drivers
// =============================================================

/// Fetch a fresh entity list and apply it if no newer refresh started.
pub async fn refresh_entities<S: MapSurface, E: EntityService>(
    dashboard: &RefCell<DashboardController<S>>,
    service: &E,
) -> bool {
    let seq = dashboard.borrow_mut().begin_refresh();
    match service.list().await {
        Ok(entities) => dashboard.borrow_mut().apply_snapshot(seq, entities),
        Err(e) => {
            log::warn!("entity refresh failed: {e}");
            false
        }
    }
}

pub async fn run_route<S: MapSurface, R: RouteService>(
    dashboard: &RefCell<DashboardController<S>>,
    router: &R,
    request: RouteRequest,
) -> Option<RouteSummary> {
    let outcome = router.route(request.waypoints()).await;
    dashboard.borrow_mut().finish_route(&request, outcome)
}

pub async fn run_distance<S: MapSurface, R: RouteService>(
    dashboard: &RefCell<DashboardController<S>>,
    router: &R,
    entity_id: &str,
    waypoints: &[Coordinate],
) -> bool {
    let outcome = router.route(waypoints).await;
    dashboard.borrow_mut().finish_distance(entity_id, outcome)
}

pub async fn run_search<S: MapSurface, G: GeocodeService>(
    dashboard: &RefCell<DashboardController<S>>,
    geocoder: &GeocodeClient<G>,
    seq: u64,
    query: &str,
) -> bool {
    let result = geocoder.search(query).await;
    dashboard.borrow_mut().search_results(seq, result)
}

pub async fn run_resolve<S: MapSurface, G: GeocodeService>(
    dashboard: &RefCell<DashboardController<S>>,
    geocoder: &GeocodeClient<G>,
    query: &str,
) -> bool {
    let outcome = geocoder.resolve(query).await;
    dashboard.borrow_mut().address_resolved(outcome)
}

pub async fn run_reverse<S: MapSurface, G: GeocodeService>(
    dashboard: &RefCell<DashboardController<S>>,
    geocoder: &GeocodeClient<G>,
    at: Coordinate,
) {
    let outcome = geocoder.reverse(at).await;
    dashboard.borrow_mut().place_resolved(outcome);
}

pub async fn run_save<S: MapSurface, E: EntityService>(
    dashboard: &RefCell<DashboardController<S>>,
    service: &E,
    entity_id: &str,
) {
    let outcome = service.save(entity_id).await;
    dashboard.borrow_mut().finish_save(entity_id, outcome);
}

pub async fn run_register<S: MapSurface, E: EntityService>(
    dashboard: &RefCell<DashboardController<S>>,
    service: &E,
    entity_id: &str,
) {
    let outcome = service.register(entity_id).await;
    dashboard.borrow_mut().finish_register(entity_id, outcome);
}

/// Fetch and apply the stored theme. Returns the region pass to schedule.
pub async fn load_theme<S: MapSurface, P: PreferenceService, T: StyleSurface>(
    dashboard: &RefCell<DashboardController<S>>,
    preferences: &P,
    surface: &mut T,
) -> Option<Effect> {
    if !dashboard.borrow_mut().begin_theme_load() {
        return None;
    }
    let stored = preferences.preferred_theme().await;
    dashboard.borrow_mut().theme_loaded(surface, stored)
}
