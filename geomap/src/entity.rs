//! Map entities and the dashboard filter.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::geo::Coordinate;

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

/// A location-anchored event as rendered on the map and in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Free-form category tag; see [`Category::from_tag`] for the known ones.
    pub category: String,
    pub organizer: String,
    /// Event start as an ISO-8601 string, rendered as given.
    pub starts_at: String,
    pub attendees: u32,
    pub max_attendees: u32,
    /// Ordered route points; the first one anchors the marker.
    pub waypoints: Vec<Coordinate>,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub registered: bool,
}

impl Entity {
    /// Marker position.
    #[must_use]
    pub fn anchor(&self) -> Option<Coordinate> {
        self.waypoints.first().copied()
    }

    #[must_use]
    pub fn kind(&self) -> Category {
        Category::from_tag(&self.category)
    }

    /// Uppercase first letter of the category tag, shown inside the marker.
    #[must_use]
    pub fn initial(&self) -> char {
        self.category
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.max_attendees > 0 && self.attendees >= self.max_attendees
    }
}

/// Known event categories with their marker colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Deporte,
    Estudio,
    Social,
    Cultural,
    Otro,
}

impl Category {
    pub const ALL: [Category; 5] = [Self::Deporte, Self::Estudio, Self::Social, Self::Cultural, Self::Otro];

    /// Map a tag to a category; unknown tags become [`Category::Otro`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "deporte" => Self::Deporte,
            "estudio" => Self::Estudio,
            "social" => Self::Social,
            "cultural" => Self::Cultural,
            _ => Self::Otro,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Deporte => "Deporte",
            Self::Estudio => "Estudio",
            Self::Social => "Social",
            Self::Cultural => "Cultural",
            Self::Otro => "Otro",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Deporte => "#28a745",
            Self::Estudio => "#007bff",
            Self::Social => "#ffc107",
            Self::Cultural => "#dc3545",
            Self::Otro => "#6c757d",
        }
    }
}

/// The backend's event endpoints, as far as the map needs them.
pub trait EntityService {
    /// Current map-eligible entities.
    fn list(&self) -> impl Future<Output = Result<Vec<Entity>, ServiceError>>;
    /// Add the entity to the user's agenda.
    fn save(&self, id: &str) -> impl Future<Output = Result<(), ServiceError>>;
    /// Register the user as an attendee.
    fn register(&self, id: &str) -> impl Future<Output = Result<(), ServiceError>>;
}

/// Category part of the dashboard filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a select value; `"all"` and the empty string mean no filter.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "" | "all" => Self::All,
            tag => Self::Only(tag.to_owned()),
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(tag) => tag,
        }
    }
}

/// Category plus free-text search, applied to the entity list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityFilter {
    pub category: CategoryFilter,
    pub search: String,
}

impl EntityFilter {
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        let category_ok = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(tag) => entity.category == *tag,
        };
        category_ok && self.matches_search(entity)
    }

    fn matches_search(&self, entity: &Entity) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&entity.title, &entity.description, &entity.organizer, &entity.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Entities passing the filter, in input order.
    #[must_use]
    pub fn apply(&self, entities: &[Entity]) -> Vec<Entity> {
        entities.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
