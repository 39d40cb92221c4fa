// src/services/suggestion_service.rs
// DOCUMENTATION: City-scoped suggested activities
// PURPOSE: Populate a per-city cache from the places source on first request,
// serve it afterwards, and let users copy suggestions into their activities

use crate::db::{ActivityStore, DestinationStore, GeographyStore, SuggestionStore};
use crate::errors::WishlistError;
use crate::models::{
    Activity, ActivityCategory, City, CreateActivityRequest, NewSuggestedActivity,
    SuggestedActivity,
};
use crate::services::{require_destination, PlacesSource, RawPlace};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Suggestions kept per city
pub const MAX_SUGGESTIONS: usize = 15;

const CURRENCY: &str = "USD";

/// Raw category key -> taxonomy entry
/// DOCUMENTATION: Keys are matched after stripping trailing segments, so
/// "catering.restaurant.pizza" falls back to "catering"
const CATEGORY_TABLE: &[(&str, ActivityCategory)] = &[
    ("tourism", ActivityCategory::Sightseeing),
    ("tourism.sights", ActivityCategory::Sightseeing),
    ("tourism.attraction", ActivityCategory::Sightseeing),
    ("heritage", ActivityCategory::Culture),
    ("building.historic", ActivityCategory::Culture),
    ("religion.place_of_worship", ActivityCategory::Culture),
    ("entertainment.museum", ActivityCategory::Culture),
    ("entertainment.culture", ActivityCategory::Culture),
    ("entertainment.zoo", ActivityCategory::Nature),
    ("entertainment.aquarium", ActivityCategory::Nature),
    ("entertainment.theme_park", ActivityCategory::Adventure),
    ("entertainment.water_park", ActivityCategory::Adventure),
    ("entertainment.activity_park", ActivityCategory::Adventure),
    ("catering", ActivityCategory::Food),
    ("catering.bar", ActivityCategory::Nightlife),
    ("catering.pub", ActivityCategory::Nightlife),
    ("catering.biergarten", ActivityCategory::Nightlife),
    ("adult.nightclub", ActivityCategory::Nightlife),
    ("natural", ActivityCategory::Nature),
    ("national_park", ActivityCategory::Nature),
    ("leisure.park", ActivityCategory::Nature),
    ("beach", ActivityCategory::Relaxation),
    ("leisure.spa", ActivityCategory::Relaxation),
    ("leisure", ActivityCategory::Relaxation),
    ("sport", ActivityCategory::Adventure),
    ("activity", ActivityCategory::Adventure),
    ("commercial", ActivityCategory::Shopping),
];

fn lookup(key: &str) -> Option<ActivityCategory> {
    CATEGORY_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, category)| *category)
}

/// Match one tag, stripping its last segment until a key matches
/// Returns the category and how many segments the matched key had
fn match_tag(tag: &str) -> Option<(ActivityCategory, usize)> {
    let mut key = tag.trim();
    loop {
        if let Some(category) = lookup(key) {
            return Some((category, key.split('.').count()));
        }
        key = &key[..key.rfind('.')?];
    }
}

/// Map a place's tags into the taxonomy
/// DOCUMENTATION: The most specific match across all tags wins (first tag
/// on ties); no match at all means sightseeing
pub fn map_category(tags: &[String]) -> ActivityCategory {
    let mut best: Option<(ActivityCategory, usize)> = None;
    for (category, depth) in tags.iter().filter_map(|tag| match_tag(tag)) {
        if best.map_or(true, |(_, best_depth)| depth > best_depth) {
            best = Some((category, depth));
        }
    }
    best.map(|(category, _)| category)
        .unwrap_or(ActivityCategory::Sightseeing)
}

/// Typical cost per person in USD when the source gives none
fn default_cost(category: ActivityCategory) -> Decimal {
    let dollars = match category {
        ActivityCategory::Sightseeing => 10,
        ActivityCategory::Culture => 20,
        ActivityCategory::Food => 35,
        ActivityCategory::Nature => 0,
        ActivityCategory::Adventure => 60,
        ActivityCategory::Nightlife => 40,
        ActivityCategory::Shopping => 50,
        ActivityCategory::Relaxation => 45,
    };
    Decimal::from(dollars)
}

fn default_duration(category: ActivityCategory) -> &'static str {
    match category {
        ActivityCategory::Sightseeing => "1-2 hours",
        ActivityCategory::Culture => "2-3 hours",
        ActivityCategory::Food => "1 hour",
        ActivityCategory::Nature => "2-4 hours",
        ActivityCategory::Adventure => "3-4 hours",
        ActivityCategory::Nightlife => "2-3 hours",
        ActivityCategory::Shopping => "1-2 hours",
        ActivityCategory::Relaxation => "2 hours",
    }
}

/// Turn raw places into suggestions for `city_name`
/// DOCUMENTATION: Drops nameless places and repeated names (case-insensitive),
/// keeps the first MAX_SUGGESTIONS, and numbers them in source order
pub fn map_places(city_name: &str, places: Vec<RawPlace>) -> Vec<NewSuggestedActivity> {
    let mut seen = HashSet::new();

    places
        .into_iter()
        .filter(|place| {
            let key = place.name.trim().to_lowercase();
            !key.is_empty() && seen.insert(key)
        })
        .take(MAX_SUGGESTIONS)
        .enumerate()
        .map(|(position, place)| {
            let category = map_category(&place.categories);
            NewSuggestedActivity {
                name: place.name.trim().to_string(),
                description: place
                    .description
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| format!("Popular {} spot in {}", category, city_name)),
                category,
                estimated_cost: Some(place.estimated_cost.unwrap_or_else(|| default_cost(category))),
                currency: Some(CURRENCY.to_string()),
                duration: Some(
                    place
                        .duration
                        .unwrap_or_else(|| default_duration(category).to_string()),
                ),
                image_url: place.image_url,
                sort_order: position as i32,
            }
        })
        .collect()
}

pub struct SuggestionService {
    geography: Arc<dyn GeographyStore>,
    destinations: Arc<dyn DestinationStore>,
    activities: Arc<dyn ActivityStore>,
    suggestions: Arc<dyn SuggestionStore>,
    source: Arc<dyn PlacesSource>,
    radius_m: u32,
}

impl SuggestionService {
    pub fn new(
        geography: Arc<dyn GeographyStore>,
        destinations: Arc<dyn DestinationStore>,
        activities: Arc<dyn ActivityStore>,
        suggestions: Arc<dyn SuggestionStore>,
        source: Arc<dyn PlacesSource>,
        radius_m: u32,
    ) -> Self {
        Self {
            geography,
            destinations,
            activities,
            suggestions,
            source,
            radius_m,
        }
    }

    /// Cached suggestions for a city, populating the cache on first use
    pub async fn for_city(&self, city_id: Uuid) -> Result<Vec<SuggestedActivity>, WishlistError> {
        let city = self.require_city(city_id).await?;

        let cached = self.suggestions.list_by_city(city.id).await?;
        if !cached.is_empty() {
            log::debug!("Suggestion cache hit for city {} ({} rows)", city.id, cached.len());
            return Ok(cached);
        }

        self.populate(&city).await
    }

    /// Suggestions for the city of one of the caller's destinations
    pub async fn for_destination(
        &self,
        user_id: Uuid,
        destination_id: Uuid,
    ) -> Result<Vec<SuggestedActivity>, WishlistError> {
        let destination =
            require_destination(self.destinations.as_ref(), destination_id, user_id).await?;
        self.for_city(destination.city_id).await
    }

    /// Drop the city's cached rows and query the source again
    pub async fn refresh(&self, city_id: Uuid) -> Result<Vec<SuggestedActivity>, WishlistError> {
        let city = self.require_city(city_id).await?;
        let removed = self.suggestions.delete_by_city(city.id).await?;
        log::info!("Cleared {} cached suggestions for city {}", removed, city.id);
        self.populate(&city).await
    }

    /// Copy a suggestion of the destination's city into its activities
    pub async fn adopt(
        &self,
        user_id: Uuid,
        destination_id: Uuid,
        suggestion_id: Uuid,
    ) -> Result<Activity, WishlistError> {
        let destination =
            require_destination(self.destinations.as_ref(), destination_id, user_id).await?;

        let suggestion = self
            .suggestions
            .find(suggestion_id)
            .await?
            .filter(|s| s.city_id == destination.city_id)
            .ok_or_else(|| {
                WishlistError::NotFound(format!("Suggestion {} not found", suggestion_id))
            })?;

        let req = CreateActivityRequest {
            name: suggestion.name,
            description: Some(suggestion.description),
            category: Some(suggestion.category),
            completed: None,
            estimated_cost: suggestion.estimated_cost,
            currency: suggestion.currency,
            sort_order: None,
        };

        let activity = self.activities.create(destination.id, &req).await?;
        log::info!(
            "Adopted suggestion {} as activity {} on destination {}",
            suggestion_id,
            activity.id,
            destination.id
        );
        Ok(activity)
    }

    async fn require_city(&self, city_id: Uuid) -> Result<City, WishlistError> {
        self.geography
            .find_city(city_id)
            .await?
            .ok_or_else(|| WishlistError::NotFound(format!("City {} not found", city_id)))
    }

    /// Query the source and persist the mapped rows
    /// DOCUMENTATION: Missing coordinates and source failures both yield an
    /// empty list and leave the city uncached
    async fn populate(&self, city: &City) -> Result<Vec<SuggestedActivity>, WishlistError> {
        let Some(center) = city.coordinates() else {
            log::debug!("City {} has no coordinates, skipping suggestions", city.id);
            return Ok(Vec::new());
        };

        let places = match self.source.nearby(center, self.radius_m).await {
            Ok(places) => places,
            Err(e) => {
                log::warn!("Suggestion lookup for city {} degraded: {}", city.id, e);
                return Ok(Vec::new());
            }
        };

        let mapped = map_places(&city.name, places);
        if mapped.is_empty() {
            return Ok(Vec::new());
        }

        let stored = self.suggestions.insert_many(city.id, &mapped).await?;
        log::info!("Cached {} suggestions for city {}", stored.len(), city.id);
        Ok(stored)
    }
}
