//! Nominatim adapter for [`GeocodeService`].
//!
//! Forward search hits `/search`, reverse lookup hits `/reverse`; both ask
//! for JSON with address details. Nominatim reports coordinates as strings,
//! so hits whose coordinates do not parse are dropped.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "geocode_test.rs"]
mod geocode_test;

use serde::Deserialize;

use geomap::error::ServiceError;
use geomap::geo::Coordinate;
use geomap::geocode::{GeocodeQuery, GeocodeService, Place, Suggestion};

/// One forward search hit.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NominatimHit {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NominatimReverse {
    #[serde(default)]
    pub address: NominatimAddress,
}

fn endpoint(base: &str, path: &str, params: &[(&str, String)]) -> Result<String, ServiceError> {
    let mut url = url::Url::parse(&format!("{base}/{path}")).map_err(|e| ServiceError::Transport(e.to_string()))?;
    url.query_pairs_mut().extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(url.into())
}

/// `GET {base}/search` URL for `query`.
///
/// # Errors
///
/// Returns [`ServiceError::Transport`] when `base` is not a valid URL.
pub fn search_url(base: &str, query: &GeocodeQuery) -> Result<String, ServiceError> {
    endpoint(
        base,
        "search",
        &[
            ("format", "json".to_owned()),
            ("q", query.text.clone()),
            ("addressdetails", "1".to_owned()),
            ("limit", query.limit.to_string()),
            ("countrycodes", query.country_codes.clone()),
            ("accept-language", query.language.clone()),
        ],
    )
}

/// `GET {base}/reverse` URL for `at`.
///
/// # Errors
///
/// Returns [`ServiceError::Transport`] when `base` is not a valid URL.
pub fn reverse_url(base: &str, at: Coordinate, language: &str) -> Result<String, ServiceError> {
    endpoint(
        base,
        "reverse",
        &[
            ("format", "json".to_owned()),
            ("lat", at.lat.to_string()),
            ("lon", at.lng.to_string()),
            ("accept-language", language.to_owned()),
        ],
    )
}

/// Convert hits to suggestions in rank order, dropping unusable ones.
pub fn suggestions_from(hits: Vec<NominatimHit>) -> Vec<Suggestion> {
    hits.into_iter()
        .filter_map(|hit| {
            let lat = hit.lat.trim().parse::<f64>().ok()?;
            let lng = hit.lon.trim().parse::<f64>().ok()?;
            let position = Coordinate::new(lat, lng);
            position.is_valid().then(|| Suggestion { label: hit.display_name, position })
        })
        .collect()
}

/// The most specific settlement name plus country.
pub fn place_from(reply: NominatimReverse) -> Place {
    let NominatimAddress { city, town, village, state, country } = reply.address;
    Place { locality: city.or(town).or(village).or(state), country }
}

#[derive(Clone, Debug)]
pub struct NominatimGeocoder {
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }
}

impl GeocodeService for NominatimGeocoder {
    async fn search(&self, query: &GeocodeQuery) -> Result<Vec<Suggestion>, ServiceError> {
        let url = search_url(&self.base_url, query)?;
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&url).send().await.map_err(super::api::transport)?;
            let hits: Vec<NominatimHit> = super::api::read_json(resp).await?;
            Ok(suggestions_from(hits))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ServiceError::Transport(format!("not available on server: {url}")))
        }
    }

    async fn reverse(&self, at: Coordinate, language: &str) -> Result<Place, ServiceError> {
        let url = reverse_url(&self.base_url, at, language)?;
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&url).send().await.map_err(super::api::transport)?;
            let reply: NominatimReverse = super::api::read_json(resp).await?;
            Ok(place_from(reply))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ServiceError::Transport(format!("not available on server: {url}")))
        }
    }
}
