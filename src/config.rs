//! Server configuration from the environment.
//!
//! `.env` is loaded by `main` before this runs, so values there and in the
//! real environment look the same here. `RUST_LOG` is read by the tracing
//! filter directly.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),
    #[error("{name} is set but empty")]
    Empty { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Overrides the Leptos site root (where `/pkg` is built).
    pub site_root: Option<PathBuf>,
    /// Public files served for any path no route claims.
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Read `PORT`, `SITE_ROOT` and `STATIC_DIR`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let site_root = non_empty(&lookup, "SITE_ROOT")?.map(PathBuf::from);
        let static_dir = non_empty(&lookup, "STATIC_DIR")?.map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);
        Ok(Self { port, site_root, static_dir })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<Option<String>, ConfigError> {
    match lookup(name) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
        other => Ok(other),
    }
}
