// src/services/geography_service.rs
// DOCUMENTATION: Read-only geography catalog
// PURPOSE: Continents, countries and cities used to pick destinations

use crate::db::GeographyStore;
use crate::errors::WishlistError;
use crate::models::{City, CityDetail, CityQuery, Continent, Country, CountryQuery};
use std::sync::Arc;
use uuid::Uuid;

pub struct GeographyService {
    geography: Arc<dyn GeographyStore>,
}

impl GeographyService {
    pub fn new(geography: Arc<dyn GeographyStore>) -> Self {
        Self { geography }
    }

    pub async fn list_continents(&self) -> Result<Vec<Continent>, WishlistError> {
        self.geography.list_continents().await
    }

    pub async fn list_countries(&self, query: CountryQuery) -> Result<Vec<Country>, WishlistError> {
        self.geography.list_countries(query.continent_id).await
    }

    /// Blank search strings are treated as no search
    pub async fn list_cities(&self, query: CityQuery) -> Result<Vec<City>, WishlistError> {
        let search = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        self.geography.list_cities(query.country_id, search).await
    }

    pub async fn get_city(&self, id: Uuid) -> Result<CityDetail, WishlistError> {
        self.geography
            .find_city_detail(id)
            .await?
            .ok_or_else(|| WishlistError::NotFound(format!("City {} not found", id)))
    }
}
