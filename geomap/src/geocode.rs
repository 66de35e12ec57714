//! Address search against an external geocoder.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`GeocodeClient`] wraps a [`GeocodeService`] with the request rules the
//! dashboard needs: short queries never reach the network, every request is
//! scoped to the configured language and countries, and a forward lookup
//! either finds a place or reports [`Resolved::NotFound`].
//!
//! [`AddressSearch`] is the suggestion list state behind the search box. Each
//! query gets a sequence number; a response is applied only if no newer
//! query was started since, so the list always reflects the latest input.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::consts::MIN_QUERY_CHARS;
use crate::error::ServiceError;
use crate::geo::Coordinate;

#[cfg(test)]
#[path = "geocode_test.rs"]
mod geocode_test;

/// Message shown when a search returned nothing.
pub const NO_RESULTS_MESSAGE: &str = "No se encontraron resultados.";

/// Message shown when the geocoder could not be reached.
pub const FAILED_MESSAGE: &str = "Error de conexión.";

/// One ranked candidate for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub position: Coordinate,
}

/// Result of a reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Place {
    pub locality: Option<String>,
    pub country: Option<String>,
}

impl Place {
    /// `"Maracaibo, Venezuela"`, or whichever half is known.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match (&self.locality, &self.country) {
            (Some(l), Some(c)) => Some(format!("{l}, {c}")),
            (Some(one), None) | (None, Some(one)) => Some(one.clone()),
            (None, None) => None,
        }
    }
}

/// A forward search as sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery {
    pub text: String,
    pub language: String,
    pub country_codes: String,
    pub limit: u32,
}

pub trait GeocodeService {
    fn search(&self, query: &GeocodeQuery) -> impl Future<Output = Result<Vec<Suggestion>, ServiceError>>;
    fn reverse(&self, at: Coordinate, language: &str) -> impl Future<Output = Result<Place, ServiceError>>;
}

/// Outcome of [`GeocodeClient::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Found(Suggestion),
    NotFound,
}

/// True when `query` is long enough to send.
#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

pub struct GeocodeClient<S> {
    service: S,
    language: String,
    country_codes: String,
    limit: u32,
}

impl<S: GeocodeService> GeocodeClient<S> {
    #[must_use]
    pub fn new(service: S, config: &ServiceConfig) -> Self {
        Self {
            service,
            language: config.language.clone(),
            country_codes: config.country_codes.clone(),
            limit: config.suggestion_limit.max(1),
        }
    }

    fn query(&self, text: &str, limit: u32) -> GeocodeQuery {
        GeocodeQuery {
            text: text.trim().to_owned(),
            language: self.language.clone(),
            country_codes: self.country_codes.clone(),
            limit,
        }
    }

    /// Ranked suggestions for `query`; empty without a request when the
    /// query is shorter than three characters.
    ///
    /// # Errors
    ///
    /// Propagates the service error for transport or decode failures.
    pub async fn search(&self, query: &str) -> Result<Vec<Suggestion>, ServiceError> {
        if !is_searchable(query) {
            return Ok(Vec::new());
        }
        self.service.search(&self.query(query, self.limit)).await
    }

    /// The single best match for `query`.
    ///
    /// # Errors
    ///
    /// Propagates the service error for transport or decode failures.
    pub async fn resolve(&self, query: &str) -> Result<Resolved, ServiceError> {
        if query.trim().is_empty() {
            return Ok(Resolved::NotFound);
        }
        let mut hits = self.service.search(&self.query(query, 1)).await?;
        Ok(if hits.is_empty() { Resolved::NotFound } else { Resolved::Found(hits.swap_remove(0)) })
    }

    /// Locality and country for a position.
    ///
    /// # Errors
    ///
    /// Propagates the service error for transport or decode failures.
    pub async fn reverse(&self, at: Coordinate) -> Result<Place, ServiceError> {
        self.service.reverse(at, &self.language).await
    }
}

/// Visible state of the suggestion dropdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SuggestionState {
    /// Query too short; dropdown hidden.
    #[default]
    Idle,
    Searching,
    Ready(Vec<Suggestion>),
    /// The geocoder answered with nothing.
    NoResults,
    /// The geocoder could not be reached.
    Failed,
}

impl SuggestionState {
    /// Inline message for the empty states.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoResults => Some(NO_RESULTS_MESSAGE),
            Self::Failed => Some(FAILED_MESSAGE),
            _ => None,
        }
    }

    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Self::Ready(list) => list,
            _ => &[],
        }
    }
}

/// Last-writer-wins suggestion list for the search box.
#[derive(Debug, Clone, Default)]
pub struct AddressSearch {
    seq: u64,
    query: String,
    state: SuggestionState,
}

impl AddressSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record new input. Returns the sequence number to search with, or
    /// `None` when the query is too short to send. Either way any response
    /// still in flight becomes stale.
    pub fn begin(&mut self, query: &str) -> Option<u64> {
        self.seq += 1;
        query.clone_into(&mut self.query);
        if !is_searchable(query) {
            self.state = SuggestionState::Idle;
            return None;
        }
        self.state = SuggestionState::Searching;
        Some(self.seq)
    }

    /// Apply a response. Returns `false` when `seq` was superseded.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<Suggestion>, ServiceError>) -> bool {
        if seq != self.seq {
            log::debug!("dropping stale suggestions for request {seq} (latest {})", self.seq);
            return false;
        }
        self.state = match result {
            Ok(list) if list.is_empty() => SuggestionState::NoResults,
            Ok(list) => SuggestionState::Ready(list),
            Err(e) => {
                log::warn!("address search failed: {e}");
                SuggestionState::Failed
            }
        };
        true
    }

    /// Hide the dropdown and invalidate in-flight responses.
    pub fn clear(&mut self) {
        self.seq += 1;
        self.query.clear();
        self.state = SuggestionState::Idle;
    }

    #[must_use]
    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}
