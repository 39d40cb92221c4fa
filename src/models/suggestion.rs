// src/models/suggestion.rs
// DOCUMENTATION: City-scoped suggested activities
// PURPOSE: Cached recommendations sourced from the external places API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Closed taxonomy every suggestion is mapped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Sightseeing,
    Culture,
    Food,
    Nature,
    Adventure,
    Nightlife,
    Shopping,
    Relaxation,
}

impl ActivityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Sightseeing => "sightseeing",
            ActivityCategory::Culture => "culture",
            ActivityCategory::Food => "food",
            ActivityCategory::Nature => "nature",
            ActivityCategory::Adventure => "adventure",
            ActivityCategory::Nightlife => "nightlife",
            ActivityCategory::Shopping => "shopping",
            ActivityCategory::Relaxation => "relaxation",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sightseeing" => Ok(ActivityCategory::Sightseeing),
            "culture" => Ok(ActivityCategory::Culture),
            "food" => Ok(ActivityCategory::Food),
            "nature" => Ok(ActivityCategory::Nature),
            "adventure" => Ok(ActivityCategory::Adventure),
            "nightlife" => Ok(ActivityCategory::Nightlife),
            "shopping" => Ok(ActivityCategory::Shopping),
            "relaxation" => Ok(ActivityCategory::Relaxation),
            other => Err(format!("unknown activity category: {}", other)),
        }
    }
}

/// Cached suggestion row, owned by a city (not by a user or destination)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SuggestedActivity {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub estimated_cost: Option<Decimal>,
    pub currency: Option<String>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Mapped suggestion ready to persist for a city
#[derive(Debug, Clone, PartialEq)]
pub struct NewSuggestedActivity {
    pub name: String,
    pub description: String,
    pub category: ActivityCategory,
    pub estimated_cost: Option<Decimal>,
    pub currency: Option<String>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
}
