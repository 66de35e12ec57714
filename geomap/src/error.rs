//! Error type shared by the external service traits.
//!
//! ERROR HANDLING
//! ==============
//! Every network collaborator (geocoder, router, preference store, entity
//! API) reports failures as a [`ServiceError`]. Callers on non-critical paths
//! log and degrade instead of surfacing these to the user.

/// Failure talking to an external HTTP service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("no route between the requested points")]
    NoRoute,
}
