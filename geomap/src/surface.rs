//! The drawing seam between the engine and a concrete map library.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`MapSurface`] is the only way the engine touches a live map. In the
//! browser it is backed by Leaflet; in tests by a recording fake. Every
//! layer and listener the engine creates comes back as an id so teardown can
//! remove exactly what was added.
//!
//! Events flow the other way: the host forwards native map events as
//! [`MapEvent`] values, but only for listeners that are still registered.

use crate::geo::{Bounds, Coordinate};
use crate::tiles::TileStyle;

/// Opaque id of a layer (tile layer, marker or polyline) on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// Opaque id of an event registration on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// What a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Map,
    Layer(LayerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    /// Zoom animation finished.
    ZoomEnd,
    /// Plain click on the map background.
    Click,
    /// A marker popup opened.
    PopupOpen,
    /// A button inside a marker popup was pressed.
    PopupAction,
}

/// Buttons rendered inside an entity popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupAction {
    RouteHere,
    Save,
    Register,
}

impl PopupAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RouteHere => "Cómo llegar",
            Self::Save => "Guardar",
            Self::Register => "Inscribirse",
        }
    }

    /// Stable token used in DOM data attributes.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::RouteHere => "route",
            Self::Save => "save",
            Self::Register => "register",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "route" => Some(Self::RouteHere),
            "save" => Some(Self::Save),
            "register" => Some(Self::Register),
            _ => None,
        }
    }
}

/// A native event forwarded by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    ZoomEnd { zoom: f64 },
    Click { at: Coordinate },
    PopupOpen { layer: LayerId },
    PopupAction { layer: LayerId, action: PopupAction },
}

impl MapEvent {
    #[must_use]
    pub fn kind(&self) -> MapEventKind {
        match self {
            Self::ZoomEnd { .. } => MapEventKind::ZoomEnd,
            Self::Click { .. } => MapEventKind::Click,
            Self::PopupOpen { .. } => MapEventKind::PopupOpen,
            Self::PopupAction { .. } => MapEventKind::PopupAction,
        }
    }
}

/// Marker glyph.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerIcon {
    /// Colored disc with the category initial.
    Category { color: &'static str, letter: char, size_px: u32, highlighted: bool },
    /// Pulsing "you are here" dot.
    OwnLocation { size_px: u32 },
    /// Teardrop pin used for address search results.
    Pin { color: &'static str, size_px: u32 },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
    pub actions: Vec<PopupAction>,
}

/// Everything needed to draw or redraw one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub popup: PopupContent,
}

/// Stroke for a route polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineStyle {
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
    /// SVG dash pattern, e.g. `"10, 10"`.
    pub dash: Option<&'static str>,
}

/// Stroke used for paths returned by the routing service.
pub const ROUTED_STYLE: PolylineStyle = PolylineStyle { color: "#007BFF", weight: 6, opacity: 0.8, dash: Some("10, 10") };

/// Stroke used for the straight connector when routing fails.
pub const FALLBACK_STYLE: PolylineStyle = PolylineStyle { color: "#FF6B6B", weight: 4, opacity: 0.6, dash: Some("5, 5") };

/// A live map the engine can draw on.
pub trait MapSurface {
    fn add_tile_layer(&mut self, style: &TileStyle) -> LayerId;
    fn add_marker(&mut self, spec: &MarkerSpec) -> LayerId;
    fn update_marker(&mut self, layer: LayerId, spec: &MarkerSpec);
    fn add_polyline(&mut self, points: &[Coordinate], style: &PolylineStyle) -> LayerId;
    fn remove_layer(&mut self, layer: LayerId);
    fn set_view(&mut self, center: Coordinate, zoom: f64);
    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32);
    fn zoom(&self) -> f64;
    fn listen(&mut self, target: EventTarget, kind: MapEventKind) -> ListenerId;
    fn unlisten(&mut self, listener: ListenerId);
    /// Release the underlying map. Called exactly once, after every layer and
    /// listener has been removed.
    fn destroy(&mut self);
}
