// src/models/destination.rs
// DOCUMENTATION: Destination aggregate models
// PURPOSE: A user's claim on a city plus its owned photos and activities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{Activity, CityDetail, Photo};

/// Destination row
/// DOCUMENTATION: At most one row exists per (user_id, city_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Destination {
    pub id: Uuid,
    pub user_id: Uuid,
    pub city_id: Uuid,
    pub notes: Option<String>,
    pub visited: bool,
    pub visited_date: Option<DateTime<Utc>>,
    pub planned_date: Option<DateTime<Utc>>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /destinations body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateDestinationRequest {
    pub city_id: Uuid,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,

    pub visited: Option<bool>,

    pub visited_date: Option<DateTime<Utc>>,

    pub planned_date: Option<DateTime<Utc>>,

    pub priority: Option<i32>,
}

/// PATCH /destinations/{id} body
/// DOCUMENTATION: Shallow merge - omitted fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDestinationRequest {
    #[validate(length(max = 5000))]
    pub notes: Option<String>,

    pub visited: Option<bool>,

    pub visited_date: Option<DateTime<Utc>>,

    pub planned_date: Option<DateTime<Utc>>,

    pub priority: Option<i32>,
}

impl UpdateDestinationRequest {
    /// Merge provided fields onto an existing destination
    /// (in-memory store; Postgres merges with COALESCE)
    #[cfg(test)]
    pub fn apply_to(&self, destination: &mut Destination) {
        if let Some(notes) = &self.notes {
            destination.notes = Some(notes.clone());
        }
        if let Some(visited) = self.visited {
            destination.visited = visited;
        }
        if let Some(date) = self.visited_date {
            destination.visited_date = Some(date);
        }
        if let Some(date) = self.planned_date {
            destination.planned_date = Some(date);
        }
        if let Some(priority) = self.priority {
            destination.priority = priority;
        }
    }
}

/// Destination with its full graph: city -> country -> continent, photos, activities
#[derive(Debug, Clone, Serialize)]
pub struct DestinationDetail {
    #[serde(flatten)]
    pub destination: Destination,
    pub city: CityDetail,
    pub photos: Vec<Photo>,
    pub activities: Vec<Activity>,
}

/// Which of a user's destinations to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationFilter {
    All,
    Continent(Uuid),
    Country(Uuid),
}

/// GET /destinations query string
#[derive(Debug, Default, Deserialize)]
pub struct DestinationListQuery {
    pub continent_id: Option<Uuid>,
    pub country_id: Option<Uuid>,
}

impl DestinationListQuery {
    /// Country takes precedence when both filters are given
    pub fn to_filter(&self) -> DestinationFilter {
        match (self.country_id, self.continent_id) {
            (Some(country), _) => DestinationFilter::Country(country),
            (None, Some(continent)) => DestinationFilter::Continent(continent),
            (None, None) => DestinationFilter::All,
        }
    }
}

/// PUT /destinations/{id}/photos/order and /activities/order body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<Uuid>,
}

/// A child row (photo or activity) together with the user owning its destination
#[derive(Debug, Clone)]
pub struct OwnedChild<T> {
    pub item: T,
    pub owner_id: Uuid,
}
