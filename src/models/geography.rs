// src/models/geography.rs
// DOCUMENTATION: Geography catalog models
// PURPOSE: Continents, countries and cities (read-only reference data)

use geo_types::Point;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Continent {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub image_url: Option<String>,
    pub continent_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_id: Uuid,
}

impl City {
    /// City centre as a point (x = longitude, y = latitude)
    /// Returns None unless both coordinates are present
    pub fn coordinates(&self) -> Option<Point<f64>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }
}

/// Country joined with its continent
/// DOCUMENTATION: Continent is optional so a broken chain can be reported
/// as "Unknown" by the statistics instead of failing the read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryWithContinent {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub image_url: Option<String>,
    pub continent: Option<Continent>,
}

/// City joined with country and continent, as embedded in destination reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDetail {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<CountryWithContinent>,
}

/// GET /countries query string
#[derive(Debug, Default, Deserialize)]
pub struct CountryQuery {
    pub continent_id: Option<Uuid>,
}

/// GET /cities query string
#[derive(Debug, Default, Deserialize)]
pub struct CityQuery {
    pub country_id: Option<Uuid>,

    /// Case-insensitive substring match on city name
    pub q: Option<String>,
}
