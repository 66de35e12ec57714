//! Marker reconciliation.
//!
//! DESIGN
//! ======
//! [`MarkerSynchronizer::markers_for`] is a pure function from the filtered
//! entity list and the own-location fix to the wanted marker specs, keyed by
//! [`MarkerKey`]. [`MarkerSynchronizer::sync`] diffs that against what is on
//! the map: new keys are added with their popup listeners, vanished keys are
//! removed along with theirs, and shared keys are redrawn only when the spec
//! changed. Whatever was displayed before, the result after a sync depends
//! only on the latest inputs.
//!
//! The synchronizer itself remembers two decorations that outlive a single
//! snapshot: highlighted entities (saved or registered during this session)
//! and per-entity route distance notes.

use std::collections::{BTreeMap, BTreeSet};

use crate::consts::{ENTITY_ICON_PX, OWN_ICON_MAX_PX, OWN_ICON_MIN_PX, OWN_ICON_PX_PER_ZOOM};
use crate::entity::Entity;
use crate::geo::Coordinate;
use crate::lifecycle::MapInstance;
use crate::surface::{
    EventTarget, LayerId, ListenerId, MapEventKind, MapSurface, MarkerIcon, MarkerSpec, PopupAction, PopupContent,
};

#[cfg(test)]
#[path = "markers_test.rs"]
mod markers_test;

/// Popup title of the own-location marker.
pub const OWN_LOCATION_TITLE: &str = "Tu ubicación actual";

/// Identity of a displayed marker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerKey {
    /// Reserved key for the user's own position.
    OwnLocation,
    Entity(String),
}

/// A marker currently on the surface.
#[derive(Debug)]
pub(crate) struct PlacedMarker {
    pub(crate) layer: LayerId,
    pub(crate) spec: MarkerSpec,
    pub(crate) listeners: Vec<ListenerId>,
}

/// Counts from one [`MarkerSynchronizer::sync`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// Own-location icon edge length for a zoom level.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn own_location_icon_px(zoom: f64) -> u32 {
    let zoom = if zoom.is_finite() { zoom } else { 0.0 };
    (zoom * OWN_ICON_PX_PER_ZOOM).clamp(OWN_ICON_MIN_PX, OWN_ICON_MAX_PX).round() as u32
}

fn own_location_spec(at: Coordinate, zoom: f64) -> MarkerSpec {
    MarkerSpec {
        position: at,
        icon: MarkerIcon::OwnLocation { size_px: own_location_icon_px(zoom) },
        popup: PopupContent { title: OWN_LOCATION_TITLE.to_owned(), ..PopupContent::default() },
    }
}

/// Marker spec for one entity, or `None` when it has no anchor point.
#[must_use]
pub fn entity_marker_spec(entity: &Entity, highlighted: bool, note: Option<&str>) -> Option<MarkerSpec> {
    let position = entity.anchor()?;
    let mut lines = vec![
        entity.category.clone(),
        format!("Organiza: {}", entity.organizer),
        format!("Fecha: {}", entity.starts_at),
        format!("Asistentes: {}/{}", entity.attendees, entity.max_attendees),
    ];
    if let Some(note) = note {
        lines.push(note.to_owned());
    }
    let mut actions = vec![PopupAction::RouteHere];
    if !entity.saved {
        actions.push(PopupAction::Save);
    }
    if !entity.registered && !entity.is_full() {
        actions.push(PopupAction::Register);
    }
    Some(MarkerSpec {
        position,
        icon: MarkerIcon::Category {
            color: entity.kind().color(),
            letter: entity.initial(),
            size_px: ENTITY_ICON_PX,
            highlighted: highlighted || entity.saved || entity.registered,
        },
        popup: PopupContent { title: entity.title.clone(), lines, actions },
    })
}

#[derive(Debug, Default)]
pub struct MarkerSynchronizer {
    highlighted: BTreeSet<String>,
    notes: BTreeMap<String, String>,
}

impl MarkerSynchronizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The marker set wanted for these inputs.
    #[must_use]
    pub fn markers_for(
        &self,
        entities: &[Entity],
        own_location: Option<Coordinate>,
        zoom: f64,
    ) -> BTreeMap<MarkerKey, MarkerSpec> {
        let mut wanted: BTreeMap<MarkerKey, MarkerSpec> = entities
            .iter()
            .filter_map(|entity| {
                let highlighted = self.highlighted.contains(&entity.id);
                let note = self.notes.get(&entity.id).map(String::as_str);
                entity_marker_spec(entity, highlighted, note).map(|spec| (MarkerKey::Entity(entity.id.clone()), spec))
            })
            .collect();
        if let Some(at) = own_location {
            wanted.insert(MarkerKey::OwnLocation, own_location_spec(at, zoom));
        }
        wanted
    }

    /// Converge the map's markers to `markers_for(entities, own_location)`.
    pub fn sync<S: MapSurface>(
        &self,
        instance: &mut MapInstance<S>,
        entities: &[Entity],
        own_location: Option<Coordinate>,
    ) -> SyncReport {
        let wanted = self.markers_for(entities, own_location, instance.zoom());
        let mut report = SyncReport::default();

        let vanished: Vec<MarkerKey> = instance
            .markers
            .keys()
            .filter(|key| !wanted.contains_key(*key))
            .cloned()
            .collect();
        for key in vanished {
            if let Some(placed) = instance.markers.remove(&key) {
                for listener in placed.listeners {
                    instance.surface.unlisten(listener);
                }
                instance.surface.remove_layer(placed.layer);
                report.removed += 1;
            }
        }

        for (key, spec) in wanted {
            if let Some(placed) = instance.markers.get_mut(&key) {
                if placed.spec == spec {
                    report.unchanged += 1;
                } else {
                    instance.surface.update_marker(placed.layer, &spec);
                    placed.spec = spec;
                    report.updated += 1;
                }
                continue;
            }
            let layer = instance.surface.add_marker(&spec);
            let listeners = match key {
                MarkerKey::Entity(_) => vec![
                    instance.surface.listen(EventTarget::Layer(layer), MapEventKind::PopupOpen),
                    instance.surface.listen(EventTarget::Layer(layer), MapEventKind::PopupAction),
                ],
                MarkerKey::OwnLocation => Vec::new(),
            };
            instance.markers.insert(key, PlacedMarker { layer, spec, listeners });
            report.added += 1;
        }

        log::debug!(
            "marker sync: +{} -{} ~{} ={}",
            report.added,
            report.removed,
            report.updated,
            report.unchanged
        );
        report
    }

    /// Resize the own-location icon after a zoom. Returns whether it was redrawn.
    pub fn on_zoom_end<S: MapSurface>(&self, instance: &mut MapInstance<S>, zoom: f64) -> bool {
        let Some(placed) = instance.markers.get_mut(&MarkerKey::OwnLocation) else {
            return false;
        };
        let spec = own_location_spec(placed.spec.position, zoom);
        if spec == placed.spec {
            return false;
        }
        instance.surface.update_marker(placed.layer, &spec);
        placed.spec = spec;
        true
    }

    /// Mark an entity after a successful save or registration.
    pub fn highlight<S: MapSurface>(&mut self, instance: Option<&mut MapInstance<S>>, entity: &Entity) {
        self.highlighted.insert(entity.id.clone());
        if let Some(instance) = instance {
            self.redraw_entity(instance, entity);
        }
    }

    #[must_use]
    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlighted.contains(id)
    }

    /// Attach a route summary line to an entity popup.
    pub fn set_note<S: MapSurface>(&mut self, instance: Option<&mut MapInstance<S>>, entity: &Entity, note: String) {
        self.notes.insert(entity.id.clone(), note);
        if let Some(instance) = instance {
            self.redraw_entity(instance, entity);
        }
    }

    #[must_use]
    pub fn note(&self, id: &str) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    fn redraw_entity<S: MapSurface>(&self, instance: &mut MapInstance<S>, entity: &Entity) {
        let key = MarkerKey::Entity(entity.id.clone());
        let Some(placed) = instance.markers.get_mut(&key) else {
            return;
        };
        let highlighted = self.highlighted.contains(&entity.id);
        let Some(spec) = entity_marker_spec(entity, highlighted, self.note(&entity.id)) else {
            return;
        };
        if spec != placed.spec {
            instance.surface.update_marker(placed.layer, &spec);
            placed.spec = spec;
        }
    }
}

/// Popup line summarizing a routed trip, e.g. `"4.2 km (10 min)"`.
#[must_use]
pub fn distance_note(distance_m: f64, duration_s: f64) -> String {
    format!("{:.1} km ({:.0} min)", distance_m / 1000.0, (duration_s / 60.0).round())
}
