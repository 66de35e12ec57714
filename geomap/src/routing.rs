//! The single route overlay.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routes are requested from an external router that may be slow or down.
//! [`RoutingCoordinator::begin_route`] clears whatever overlay exists and
//! issues a numbered request; [`RoutingCoordinator::finish_route`] draws the
//! answer only if that request is still the latest. A failed request still
//! draws something: a dashed straight connector through the waypoints.
//!
//! ERROR HANDLING
//! ==============
//! Fewer than two points is a caller bug (debug assertion, then
//! [`RouteError::TooFewPoints`]). Router failures never reach the caller;
//! they are logged and replaced by the straight connector.

use std::future::Future;

use crate::consts::ROUTE_FIT_PADDING_PX;
use crate::error::ServiceError;
use crate::geo::{Bounds, Coordinate, path_length_m};
use crate::lifecycle::{MapHandle, MapInstance};
use crate::surface::{FALLBACK_STYLE, LayerId, MapSurface, ROUTED_STYLE};

#[cfg(test)]
#[path = "routing_test.rs"]
mod routing_test;

/// A path returned by the routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    pub points: Vec<Coordinate>,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// Ordered waypoints in, street path out.
pub trait RouteService {
    fn route(&self, waypoints: &[Coordinate]) -> impl Future<Output = Result<RoutePath, ServiceError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("a route needs at least two points, got {0}")]
    TooFewPoints(usize),
}

/// How the current overlay was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Routed,
    Straight,
}

#[derive(Debug)]
pub(crate) struct RouteOverlay {
    pub(crate) layer: LayerId,
    pub(crate) points: Vec<Coordinate>,
    pub(crate) kind: RouteKind,
}

/// An issued route request awaiting the router's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    ticket: u64,
    map: MapHandle,
    waypoints: Vec<Coordinate>,
}

impl RouteRequest {
    #[must_use]
    pub fn map(&self) -> MapHandle {
        self.map
    }

    #[must_use]
    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }
}

/// What [`RoutingCoordinator::finish_route`] drew.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub kind: RouteKind,
    pub distance_m: f64,
    pub duration_s: Option<f64>,
}

#[derive(Debug, Default)]
pub struct RoutingCoordinator {
    next_ticket: u64,
    pending: Option<u64>,
}

impl RoutingCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the current overlay and issue a request for `points`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::TooFewPoints`] for fewer than two points, after
    /// a debug assertion. The map is left untouched in that case.
    pub fn begin_route<S: MapSurface>(
        &mut self,
        map: MapHandle,
        instance: &mut MapInstance<S>,
        points: &[Coordinate],
    ) -> Result<RouteRequest, RouteError> {
        debug_assert!(points.len() >= 2, "route requested with {} point(s)", points.len());
        if points.len() < 2 {
            return Err(RouteError::TooFewPoints(points.len()));
        }
        self.clear_route(instance);
        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        Ok(RouteRequest { ticket: self.next_ticket, map, waypoints: points.to_vec() })
    }

    /// Draw the router's answer for `request`. Returns `None` when a newer
    /// request or a clear superseded it.
    pub fn finish_route<S: MapSurface>(
        &mut self,
        instance: &mut MapInstance<S>,
        request: &RouteRequest,
        outcome: Result<RoutePath, ServiceError>,
    ) -> Option<RouteSummary> {
        if self.pending != Some(request.ticket) {
            log::debug!("dropping superseded route response (ticket {})", request.ticket);
            return None;
        }
        self.pending = None;

        let (points, style, summary) = match outcome {
            Ok(path) if path.points.len() >= 2 => {
                let summary = RouteSummary {
                    kind: RouteKind::Routed,
                    distance_m: path.distance_m,
                    duration_s: Some(path.duration_s),
                };
                (path.points, ROUTED_STYLE, summary)
            }
            outcome => {
                match outcome {
                    Err(e) => log::warn!("routing failed, drawing straight connector: {e}"),
                    Ok(_) => log::warn!("router returned a degenerate path, drawing straight connector"),
                }
                let summary = RouteSummary {
                    kind: RouteKind::Straight,
                    distance_m: path_length_m(&request.waypoints),
                    duration_s: None,
                };
                (request.waypoints.clone(), FALLBACK_STYLE, summary)
            }
        };

        let layer = instance.surface.add_polyline(&points, &style);
        if let Some(bounds) = Bounds::around(&points) {
            instance.surface.fit_bounds(bounds, ROUTE_FIT_PADDING_PX);
        }
        instance.route = Some(RouteOverlay { layer, points, kind: summary.kind });
        Some(summary)
    }

    /// Remove the overlay if present and cancel any in-flight request.
    pub fn clear_route<S: MapSurface>(&mut self, instance: &mut MapInstance<S>) -> bool {
        self.pending = None;
        let Some(route) = instance.route.take() else {
            return false;
        };
        instance.surface.remove_layer(route.layer);
        true
    }

    /// Forget in-flight work, e.g. when the map is unmounted.
    pub fn reset(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// How picks in the route drafting modal accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftMode {
    /// Exactly two points; a pick after a complete pair starts a new pair.
    #[default]
    Simple,
    /// Every pick extends the route.
    Multiple,
}

/// Points picked so far while drafting a route.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteDraft {
    mode: DraftMode,
    points: Vec<Coordinate>,
}

impl RouteDraft {
    #[must_use]
    pub fn new(mode: DraftMode) -> Self {
        Self { mode, points: Vec::new() }
    }

    /// Add a point. Returns the waypoints to route once there are at least two.
    pub fn pick(&mut self, at: Coordinate) -> Option<Vec<Coordinate>> {
        if self.mode == DraftMode::Simple && self.points.len() >= 2 {
            self.points.clear();
        }
        self.points.push(at);
        (self.points.len() >= 2).then(|| self.points.clone())
    }

    /// Drop the last pick. Returns the remaining waypoints if still routable.
    pub fn undo(&mut self) -> Option<Vec<Coordinate>> {
        self.points.pop();
        (self.points.len() >= 2).then(|| self.points.clone())
    }

    pub fn set_mode(&mut self, mode: DraftMode) {
        if self.mode != mode {
            self.mode = mode;
            self.points.clear();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }
}
