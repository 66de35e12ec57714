//! Wire DTOs for the GeoPlanner REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the API's Spanish JSON keys. Only the subset the
//! dashboard reads is modeled; unknown keys are ignored. [`Post::into_entity`]
//! is the one place where a post becomes a map entity.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use geomap::consts::DEFAULT_MAX_ATTENDEES;
use geomap::entity::Entity;
use geomap::geo::Coordinate;

/// Privacy value of posts visible to everyone.
pub const PUBLIC_PRIVACY: &str = "publica";

const UNTITLED_EVENT: &str = "Evento";
const UNKNOWN_ORGANIZER: &str = "Desconocido";
const DEFAULT_CATEGORY: &str = "Social";

/// The authenticated user as returned by `GET /users/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub nombre_usuario: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    /// Registry key of the user's theme, if they ever picked one.
    #[serde(default)]
    pub tema_preferido: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub pais: Option<String>,
}

/// One ordered point of a post's route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub latitud: f64,
    pub longitud: f64,
    #[serde(default)]
    pub etiqueta: String,
    #[serde(default)]
    pub orden: u32,
}

impl RoutePoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitud, self.longitud)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Inscription {
    pub id_usuario: String,
    #[serde(default)]
    pub nombre: String,
}

/// A feed post. Posts with an event date and a route are events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub texto: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub fecha_evento: Option<String>,
    #[serde(default)]
    pub privacidad: String,
    #[serde(default)]
    pub nombre_autor: Option<String>,
    #[serde(default)]
    pub rutas: Vec<RoutePoint>,
    #[serde(default)]
    pub inscritos: Vec<Inscription>,
    #[serde(default)]
    pub max_asistentes: Option<u32>,
}

impl Post {
    /// Whether this post shows up on the map.
    pub fn is_event(&self) -> bool {
        self.privacidad == PUBLIC_PRIVACY
            && self.fecha_evento.as_deref().is_some_and(|d| !d.trim().is_empty())
            && !self.rutas.is_empty()
    }

    /// Convert an event post into a map entity. Route points are ordered by
    /// `orden`, ties keeping their list order. Returns `None` for posts that
    /// are not events.
    pub fn into_entity(self, user_id: Option<&str>) -> Option<Entity> {
        if !self.is_event() {
            return None;
        }
        let mut points = self.rutas;
        points.sort_by_key(|p| p.orden);
        let title = self
            .texto
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .unwrap_or(UNTITLED_EVENT)
            .to_owned();
        let registered = user_id.is_some_and(|id| self.inscritos.iter().any(|i| i.id_usuario == id));
        Some(Entity {
            id: self.id,
            title,
            description: self.texto,
            category: self
                .tipo
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
            organizer: self
                .nombre_autor
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ORGANIZER.to_owned()),
            starts_at: self.fecha_evento.unwrap_or_default(),
            attendees: u32::try_from(self.inscritos.len()).unwrap_or(u32::MAX),
            max_attendees: self.max_asistentes.unwrap_or(DEFAULT_MAX_ATTENDEES),
            waypoints: points.iter().map(RoutePoint::coordinate).collect(),
            saved: false,
            registered,
        })
    }
}

/// Event entities among `posts`, in feed order.
pub fn entities_from_posts(posts: Vec<Post>, user_id: Option<&str>) -> Vec<Entity> {
    posts.into_iter().filter_map(|p| p.into_entity(user_id)).collect()
}

/// Body of `POST /saved-events/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveEventRequest {
    pub id_publicacion: String,
}

/// Body of `PUT /users/me` when only the theme changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemePreferenceUpdate {
    pub tema_preferido: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<String>,
}
