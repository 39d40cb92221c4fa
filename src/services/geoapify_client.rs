// src/services/geoapify_client.rs
// DOCUMENTATION: Geoapify Places API client
// PURPOSE: Fetch points of interest around a city centre for suggested activities

use crate::errors::WishlistError;
use async_trait::async_trait;
use geo_types::Point;
use geojson::{Feature, GeoJson};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Geoapify categories requested for suggestions
const REQUESTED_CATEGORIES: &str = "tourism,heritage,entertainment,catering,natural,leisure,\
     sport,commercial.shopping_mall,adult.nightclub";

/// Ask for more than we keep so name dedup still leaves a full list
const RESULT_LIMIT: u32 = 40;

/// Place record as returned by an external source
/// DOCUMENTATION: Every field but the name may be missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlace {
    pub name: String,
    pub description: Option<String>,
    /// Dot-separated category tags, most general first (e.g. "catering.restaurant")
    pub categories: Vec<String>,
    pub estimated_cost: Option<Decimal>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
}

/// Anything that can list places around a point
#[async_trait]
pub trait PlacesSource: Send + Sync {
    async fn nearby(&self, center: Point<f64>, radius_m: u32) -> Result<Vec<RawPlace>, WishlistError>;
}

pub struct GeoapifyClient {
    /// HTTP client for making requests
    client: Client,
    /// Geoapify API key (empty when unconfigured)
    api_key: String,
    /// Base URL for the Geoapify API
    base_url: String,
}

impl GeoapifyClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.geoapify.com".to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[async_trait]
impl PlacesSource for GeoapifyClient {
    /// Search places within `radius_m` meters of `center` (x = lon, y = lat)
    async fn nearby(&self, center: Point<f64>, radius_m: u32) -> Result<Vec<RawPlace>, WishlistError> {
        if !self.is_configured() {
            return Err(WishlistError::ExternalApiError(
                "Geoapify API key not configured".to_string(),
            ));
        }

        let url = format!("{}/v2/places", self.base_url);
        let (lon, lat) = (center.x(), center.y());
        let filter = format!("circle:{},{},{}", lon, lat, radius_m);
        let bias = format!("proximity:{},{}", lon, lat);
        let limit = RESULT_LIMIT.to_string();

        log::debug!(
            "Geoapify places search: lat={}, lon={}, radius={}",
            lat,
            lon,
            radius_m
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("categories", REQUESTED_CATEGORIES),
                ("filter", filter.as_str()),
                ("bias", bias.as_str()),
                ("limit", limit.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("Geoapify request failed: {}", e);
                WishlistError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Geoapify API error {}: {}", status, body);
            return Err(WishlistError::ExternalApiError(format!(
                "API error {}",
                status
            )));
        }

        let body = response.text().await.map_err(|e| {
            log::error!("Failed to read Geoapify response: {}", e);
            WishlistError::ExternalApiError(format!("Read error: {}", e))
        })?;

        let places = parse_places(&body)?;
        log::info!("Geoapify search returned {} places", places.len());
        Ok(places)
    }
}

/// Parse a Geoapify FeatureCollection body into raw places
/// DOCUMENTATION: Features without a name are dropped
pub fn parse_places(body: &str) -> Result<Vec<RawPlace>, WishlistError> {
    let geojson = GeoJson::from_str(body).map_err(|e| {
        log::error!("Failed to parse Geoapify response: {}", e);
        WishlistError::ExternalApiError(format!("Parse error: {}", e))
    })?;

    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection
            .features
            .iter()
            .filter_map(feature_to_place)
            .collect()),
        _ => Err(WishlistError::ExternalApiError(
            "Expected a FeatureCollection".to_string(),
        )),
    }
}

fn feature_to_place(feature: &Feature) -> Option<RawPlace> {
    let name = feature
        .property("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())?
        .to_string();

    let categories = feature
        .property("categories")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    // Source-specific extras live under datasource.raw
    let raw = feature
        .property("datasource")
        .and_then(|ds| ds.get("raw"));
    let raw_str = |key: &str| {
        raw.and_then(|r| r.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let description = raw_str("description").or_else(|| {
        feature
            .property("address_line2")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    Some(RawPlace {
        name,
        description,
        categories,
        estimated_cost: None,
        duration: None,
        image_url: raw_str("image"),
    })
}
