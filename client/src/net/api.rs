//! REST client for the GeoPlanner API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with a transport error since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses map to [`ServiceError::Status`], unreadable bodies to
//! [`ServiceError::Decode`] and network failures to
//! [`ServiceError::Transport`]. The dashboard controller decides which of
//! these reach the user.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use geomap::entity::{Entity, EntityService};
use geomap::error::ServiceError;
use geomap::theme_engine::PreferenceService;

use super::types::User;
#[cfg(feature = "hydrate")]
use super::types::{Post, SaveEventRequest, ThemePreferenceUpdate, entities_from_posts};

/// `localStorage` key holding the session token written at login.
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// Page size used when loading the event feed.
pub const FEED_PAGE_SIZE: u32 = 100;

#[cfg(any(test, feature = "hydrate"))]
fn posts_endpoint(base: &str, skip: u32, limit: u32) -> String {
    format!("{base}/posts/?skip={skip}&limit={limit}")
}

#[cfg(any(test, feature = "hydrate"))]
fn saved_events_endpoint(base: &str) -> String {
    format!("{base}/saved-events/")
}

#[cfg(any(test, feature = "hydrate"))]
fn inscription_endpoint(base: &str, post_id: &str) -> String {
    format!("{base}/posts/{post_id}/inscripciones")
}

#[cfg(any(test, feature = "hydrate"))]
fn current_user_endpoint(base: &str) -> String {
    format!("{base}/users/me")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> ServiceError {
    ServiceError::Transport("not available on server".to_owned())
}

/// Authenticated handle on the REST API.
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    user_id: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), token, user_id: None }
    }

    /// Client using the token left in `localStorage` by the login page.
    pub fn from_storage(base_url: &str) -> Self {
        Self::new(base_url, crate::util::ui_persistence::load_raw(TOKEN_STORAGE_KEY))
    }

    /// Mark entities as registered when `user_id` is among their inscriptions.
    #[must_use]
    pub fn with_user(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_owned());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn authorization(&self) -> Option<String> {
        self.token.as_deref().filter(|t| !t.is_empty()).map(bearer)
    }

    #[cfg(feature = "hydrate")]
    fn authorize(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match self.authorization() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    /// Fetch the authenticated user from `GET /users/me`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] for transport, status or decode failures.
    pub async fn current_user(&self) -> Result<User, ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            let url = current_user_endpoint(&self.base_url);
            let resp = self.authorize(gloo_net::http::Request::get(&url)).send().await.map_err(transport)?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }

    /// Fetch one page of the feed from `GET /posts/`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] for transport, status or decode failures.
    pub async fn list_entities(&self, skip: u32, limit: u32) -> Result<Vec<Entity>, ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            let url = posts_endpoint(&self.base_url, skip, limit);
            let resp = self.authorize(gloo_net::http::Request::get(&url)).send().await.map_err(transport)?;
            let posts: Vec<Post> = read_json(resp).await?;
            Ok(entities_from_posts(posts, self.user_id.as_deref()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (skip, limit);
            Err(unavailable())
        }
    }

    /// Add a post to the user's agenda via `POST /saved-events/`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] for transport or status failures.
    pub async fn save_event(&self, post_id: &str) -> Result<(), ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            let url = saved_events_endpoint(&self.base_url);
            let body = SaveEventRequest { id_publicacion: post_id.to_owned() };
            let request = self
                .authorize(gloo_net::http::Request::post(&url))
                .json(&body)
                .map_err(transport)?;
            expect_ok(request.send().await.map_err(transport)?)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = post_id;
            Err(unavailable())
        }
    }

    /// Sign the user up for an event via `POST /posts/{id}/inscripciones`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] for transport or status failures.
    pub async fn register_for(&self, post_id: &str) -> Result<(), ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            let url = inscription_endpoint(&self.base_url, post_id);
            let resp = self.authorize(gloo_net::http::Request::post(&url)).send().await.map_err(transport)?;
            expect_ok(resp)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = post_id;
            Err(unavailable())
        }
    }

    /// Store the theme choice via `PUT /users/me`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] for transport or status failures.
    pub async fn update_theme(&self, theme: &str) -> Result<(), ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            let url = current_user_endpoint(&self.base_url);
            let body = ThemePreferenceUpdate { tema_preferido: theme.to_owned() };
            let request = self
                .authorize(gloo_net::http::Request::put(&url))
                .json(&body)
                .map_err(transport)?;
            expect_ok(request.send().await.map_err(transport)?)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = theme;
            Err(unavailable())
        }
    }
}

impl EntityService for ApiClient {
    async fn list(&self) -> Result<Vec<Entity>, ServiceError> {
        self.list_entities(0, FEED_PAGE_SIZE).await
    }

    async fn save(&self, id: &str) -> Result<(), ServiceError> {
        self.save_event(id).await
    }

    async fn register(&self, id: &str) -> Result<(), ServiceError> {
        self.register_for(id).await
    }
}

impl PreferenceService for ApiClient {
    async fn preferred_theme(&self) -> Result<Option<String>, ServiceError> {
        Ok(self.current_user().await?.tema_preferido)
    }

    async fn set_preferred_theme(&self, name: &str) -> Result<(), ServiceError> {
        self.update_theme(name).await
    }
}

#[cfg(feature = "hydrate")]
pub(crate) fn transport(e: gloo_net::Error) -> ServiceError {
    ServiceError::Transport(e.to_string())
}

#[cfg(feature = "hydrate")]
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> Result<T, ServiceError> {
    if !resp.ok() {
        return Err(ServiceError::Status(resp.status()));
    }
    resp.json::<T>().await.map_err(|e| ServiceError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
fn expect_ok(resp: gloo_net::http::Response) -> Result<(), ServiceError> {
    if resp.ok() { Ok(()) } else { Err(ServiceError::Status(resp.status())) }
}
