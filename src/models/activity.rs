// src/models/activity.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Planned or completed task attached to a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub destination_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub completed: bool,
    pub estimated_cost: Option<Decimal>,
    pub currency: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /destinations/{id}/activities body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub category: Option<String>,

    pub completed: Option<bool>,

    pub estimated_cost: Option<Decimal>,

    #[validate(length(equal = 3))]
    pub currency: Option<String>,

    pub sort_order: Option<i32>,
}

/// PATCH /activities/{id} body
/// DOCUMENTATION: Shallow merge - omitted fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub category: Option<String>,

    pub completed: Option<bool>,

    pub estimated_cost: Option<Decimal>,

    #[validate(length(equal = 3))]
    pub currency: Option<String>,
}

impl UpdateActivityRequest {
    #[cfg(test)]
    pub fn apply_to(&self, activity: &mut Activity) {
        if let Some(name) = &self.name {
            activity.name = name.clone();
        }
        if let Some(description) = &self.description {
            activity.description = Some(description.clone());
        }
        if let Some(category) = &self.category {
            activity.category = Some(category.clone());
        }
        if let Some(completed) = self.completed {
            activity.completed = completed;
        }
        if let Some(cost) = self.estimated_cost {
            activity.estimated_cost = Some(cost);
        }
        if let Some(currency) = &self.currency {
            activity.currency = Some(currency.clone());
        }
    }
}
