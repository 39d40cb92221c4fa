// src/models/stats.rs
// DOCUMENTATION: Destination statistics response
// PURPOSE: Summary counts folded from a user's destination list

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// GET /destinations/stats response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationStats {
    pub total_destinations: usize,
    pub visited_count: usize,
    pub pending_count: usize,
    /// Continent name -> destination count ("Unknown" when the chain is broken)
    pub continent_stats: BTreeMap<String, usize>,
    /// Country name -> destination count ("Unknown" when the chain is broken)
    pub country_stats: BTreeMap<String, usize>,
    /// One entry per distinct country, most cities first
    pub country_details: Vec<CountryDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDetail {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub continent_name: String,
    pub city_count: usize,
    pub cities: Vec<CountryCityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCityEntry {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub destination_id: Uuid,
    pub visited: bool,
}
