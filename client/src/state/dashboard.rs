//! Render-side snapshot of the dashboard.
//!
//! DESIGN
//! ======
//! The `geomap` controller owns the truth and lives outside the reactive
//! graph. After every controller call the host copies what the view needs
//! into [`DashboardUi`] (held in an `RwSignal`), so components only ever read
//! plain data. Components never call the controller themselves; they push an
//! [`Intent`] and the map host drains the queue.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use geomap::controller::{DashboardController, Notice, ViewMode};
use geomap::entity::Entity;
use geomap::geocode::{Suggestion, SuggestionState};
use geomap::markers::distance_note;
use geomap::routing::{DraftMode, RouteKind, RouteSummary};
use geomap::surface::MapSurface;
use geomap::theme::DEFAULT_THEME;
use geomap::tiles::DEFAULT_TILE_STYLE;

/// A notice on screen, with an id for dismissal.
#[derive(Clone, Debug, PartialEq)]
pub struct NoticeEntry {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardUi {
    pub view_mode: ViewMode,
    /// Entities passing the current filter, in feed order.
    pub visible: Vec<Entity>,
    pub total: usize,
    pub category: String,
    pub search_text: String,
    pub address_query: String,
    pub suggestions: SuggestionState,
    pub notices: Vec<NoticeEntry>,
    pub theme: &'static str,
    pub tile_style: &'static str,
    pub place_label: Option<String>,
    pub own_location_known: bool,
    pub drafting: bool,
    pub draft_mode: DraftMode,
    pub draft_points: usize,
    pub route_pending: bool,
    pub route_note: Option<String>,
    pub loading: bool,
    next_notice_id: u64,
}

impl Default for DashboardUi {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::List,
            visible: Vec::new(),
            total: 0,
            category: "all".to_owned(),
            search_text: String::new(),
            address_query: String::new(),
            suggestions: SuggestionState::Idle,
            notices: Vec::new(),
            theme: DEFAULT_THEME,
            tile_style: DEFAULT_TILE_STYLE,
            place_label: None,
            own_location_known: false,
            drafting: false,
            draft_mode: DraftMode::Simple,
            draft_points: 0,
            route_pending: false,
            route_note: None,
            loading: false,
            next_notice_id: 0,
        }
    }
}

impl DashboardUi {
    /// Copy the controller's render-relevant state.
    pub fn sync_from<S: MapSurface>(&mut self, dashboard: &DashboardController<S>) {
        self.view_mode = dashboard.view_mode();
        self.visible = dashboard.visible_entities();
        self.total = dashboard.entities().len();
        self.category = dashboard.filter().category.value().to_owned();
        self.search_text.clone_from(&dashboard.filter().search);
        self.address_query = dashboard.search_query().to_owned();
        self.suggestions = dashboard.suggestions().clone();
        self.theme = dashboard.active_theme().key;
        self.tile_style = dashboard.tile_style().key;
        self.place_label = dashboard.place_label().map(str::to_owned);
        self.own_location_known = dashboard.own_location().is_some();
        self.drafting = dashboard.is_drafting();
        self.draft_mode = dashboard.draft().mode();
        self.draft_points = dashboard.draft().points().len();
        self.route_pending = dashboard.is_route_pending();
    }

    pub fn push_notices(&mut self, notices: impl IntoIterator<Item = Notice>) {
        for notice in notices {
            self.next_notice_id += 1;
            self.notices.push(NoticeEntry { id: self.next_notice_id, notice });
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    /// Remember what the last finished route drew.
    pub fn set_route(&mut self, summary: Option<&RouteSummary>) {
        self.route_note = summary.map(route_note);
    }
}

/// Status-line text for a drawn route.
pub fn route_note(summary: &RouteSummary) -> String {
    match (summary.kind, summary.duration_s) {
        (RouteKind::Routed, Some(duration)) => distance_note(summary.distance_m, duration),
        _ => format!("{:.1} km en línea recta", summary.distance_m / 1000.0),
    }
}

/// A user action for the map host to carry out against the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    SetView(ViewMode),
    SetCategory(String),
    SetSearchText(String),
    /// Debounced address keystrokes.
    AddressInput(String),
    /// Enter in the address box.
    AddressSubmit(String),
    PickSuggestion(Suggestion),
    ClearSearchPin,
    SelectTheme(String),
    SetTileStyle(String),
    CenterOnMe,
    StartDrafting(DraftMode),
    StopDrafting,
    UndoPick,
    ClearRoute,
    Save(String),
    Register(String),
    Refresh,
}

/// FIFO of intents not yet handled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntentQueue {
    items: Vec<Intent>,
}

impl IntentQueue {
    pub fn push(&mut self, intent: Intent) {
        self.items.push(intent);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.items)
    }
}
