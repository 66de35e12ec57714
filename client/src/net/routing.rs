//! OSRM adapter for [`RouteService`].
//!
//! Requests the driving profile with full GeoJSON geometry. OSRM speaks
//! `lng,lat`; everything past this module speaks [`Coordinate`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "routing_test.rs"]
mod routing_test;

use serde::Deserialize;

use geomap::error::ServiceError;
use geomap::geo::Coordinate;
use geomap::routing::{RoutePath, RouteService};

const OK_CODE: &str = "Ok";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OsrmGeometry {
    /// `[lng, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OsrmRoute {
    pub distance: f64,
    pub duration: f64,
    pub geometry: OsrmGeometry,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OsrmReply {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// `GET {base}/route/v1/driving/{lng},{lat};...` URL for `waypoints`.
pub fn route_url(base: &str, waypoints: &[Coordinate]) -> String {
    let path = waypoints
        .iter()
        .map(|c| format!("{},{}", c.lng, c.lat))
        .collect::<Vec<_>>()
        .join(";");
    format!("{base}/route/v1/driving/{path}?overview=full&geometries=geojson")
}

/// The first route of a reply as a [`RoutePath`].
///
/// # Errors
///
/// Returns [`ServiceError::NoRoute`] when the router found nothing.
pub fn path_from(reply: OsrmReply) -> Result<RoutePath, ServiceError> {
    if reply.code != OK_CODE {
        return Err(ServiceError::NoRoute);
    }
    let route = reply.routes.into_iter().next().ok_or(ServiceError::NoRoute)?;
    let points: Vec<Coordinate> = route
        .geometry
        .coordinates
        .iter()
        .map(|&[lng, lat]| Coordinate::new(lat, lng))
        .collect();
    if points.len() < 2 {
        return Err(ServiceError::NoRoute);
    }
    Ok(RoutePath { points, distance_m: route.distance, duration_s: route.duration })
}

#[derive(Clone, Debug)]
pub struct OsrmRouter {
    base_url: String,
}

impl OsrmRouter {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }
}

impl RouteService for OsrmRouter {
    async fn route(&self, waypoints: &[Coordinate]) -> Result<RoutePath, ServiceError> {
        let url = route_url(&self.base_url, waypoints);
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&url).send().await.map_err(super::api::transport)?;
            let reply: OsrmReply = super::api::read_json(resp).await?;
            path_from(reply)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ServiceError::Transport(format!("not available on server: {url}")))
        }
    }
}
