// src/services/stats_service.rs
// DOCUMENTATION: Destination statistics
// PURPOSE: Fold a user's destination list into counts by status, continent and country

use crate::models::{CountryCityEntry, CountryDetail, DestinationDetail, DestinationStats};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

const UNKNOWN: &str = "Unknown";

/// Recompute statistics from the full destination graph
/// DOCUMENTATION: Destinations whose city has no country are counted under
/// "Unknown" in the name maps but have no entry in `country_details`.
/// Countries with equal city counts keep the order they were first seen in.
pub fn compute_stats(destinations: &[DestinationDetail]) -> DestinationStats {
    let total_destinations = destinations.len();
    let visited_count = destinations
        .iter()
        .filter(|d| d.destination.visited)
        .count();

    let mut continent_stats: BTreeMap<String, usize> = BTreeMap::new();
    let mut country_stats: BTreeMap<String, usize> = BTreeMap::new();
    let mut country_details: Vec<CountryDetail> = Vec::new();
    let mut country_index: HashMap<Uuid, usize> = HashMap::new();

    for detail in destinations {
        let country = detail.city.country.as_ref();
        let continent_name = country
            .and_then(|c| c.continent.as_ref())
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN);
        let country_name = country.map(|c| c.name.as_str()).unwrap_or(UNKNOWN);

        *continent_stats.entry(continent_name.to_string()).or_insert(0) += 1;
        *country_stats.entry(country_name.to_string()).or_insert(0) += 1;

        let Some(country) = country else {
            continue;
        };

        let slot = *country_index.entry(country.id).or_insert_with(|| {
            country_details.push(CountryDetail {
                id: country.id,
                name: country.name.clone(),
                code: country.code.clone(),
                continent_name: continent_name.to_string(),
                city_count: 0,
                cities: Vec::new(),
            });
            country_details.len() - 1
        });

        let entry = &mut country_details[slot];
        entry.city_count += 1;
        entry.cities.push(CountryCityEntry {
            id: detail.city.id,
            name: detail.city.name.clone(),
            image_url: detail.city.image_url.clone(),
            destination_id: detail.destination.id,
            visited: detail.destination.visited,
        });
    }

    // sort_by is stable
    country_details.sort_by(|a, b| b.city_count.cmp(&a.city_count));

    DestinationStats {
        total_destinations,
        visited_count,
        pending_count: total_destinations - visited_count,
        continent_stats,
        country_stats,
        country_details,
    }
}
