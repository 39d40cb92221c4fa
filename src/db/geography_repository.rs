// src/db/geography_repository.rs
// DOCUMENTATION: Geography catalog queries
// PURPOSE: Read-only access to continents, countries and cities

use crate::db::GeographyStore;
use crate::errors::WishlistError;
use crate::models::{City, CityDetail, Continent, Country, CountryWithContinent};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const CITY_SEARCH_LIMIT: i64 = 50;

/// Flattened city -> country -> continent join
/// DOCUMENTATION: Country and continent columns are nullable because of the LEFT JOINs
#[derive(Debug, FromRow)]
pub(crate) struct CityGraphRow {
    pub city_id: Uuid,
    pub city_name: String,
    pub city_image_url: Option<String>,
    pub city_latitude: Option<f64>,
    pub city_longitude: Option<f64>,
    pub country_id: Option<Uuid>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub country_image_url: Option<String>,
    pub continent_id: Option<Uuid>,
    pub continent_name: Option<String>,
    pub continent_code: Option<String>,
    pub continent_image_url: Option<String>,
}

impl CityGraphRow {
    pub(crate) fn into_detail(self) -> CityDetail {
        let continent = match (self.continent_id, self.continent_name, self.continent_code) {
            (Some(id), Some(name), Some(code)) => Some(Continent {
                id,
                name,
                code,
                image_url: self.continent_image_url,
            }),
            _ => None,
        };

        let country = match (self.country_id, self.country_name, self.country_code) {
            (Some(id), Some(name), Some(code)) => Some(CountryWithContinent {
                id,
                name,
                code,
                image_url: self.country_image_url,
                continent,
            }),
            _ => None,
        };

        CityDetail {
            id: self.city_id,
            name: self.city_name,
            image_url: self.city_image_url,
            latitude: self.city_latitude,
            longitude: self.city_longitude,
            country,
        }
    }
}

/// Column list shared with the destination graph query
pub(crate) const CITY_GRAPH_COLUMNS: &str = r#"
    ci.id AS city_id, ci.name AS city_name, ci.image_url AS city_image_url,
    ci.latitude AS city_latitude, ci.longitude AS city_longitude,
    co.id AS country_id, co.name AS country_name, co.code AS country_code,
    co.image_url AS country_image_url,
    cn.id AS continent_id, cn.name AS continent_name, cn.code AS continent_code,
    cn.image_url AS continent_image_url
"#;

pub struct PgGeographyRepository {
    pool: PgPool,
}

impl PgGeographyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeographyStore for PgGeographyRepository {
    async fn list_continents(&self) -> Result<Vec<Continent>, WishlistError> {
        sqlx::query_as::<_, Continent>("SELECT * FROM continents ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list continents: {}", e);
                WishlistError::DatabaseError(e.to_string())
            })
    }

    async fn list_countries(
        &self,
        continent_id: Option<Uuid>,
    ) -> Result<Vec<Country>, WishlistError> {
        let query = match continent_id {
            Some(continent_id) => sqlx::query_as::<_, Country>(
                "SELECT * FROM countries WHERE continent_id = $1 ORDER BY name ASC",
            )
            .bind(continent_id),
            None => sqlx::query_as::<_, Country>("SELECT * FROM countries ORDER BY name ASC"),
        };

        query.fetch_all(&self.pool).await.map_err(|e| {
            log::error!("Failed to list countries: {}", e);
            WishlistError::DatabaseError(e.to_string())
        })
    }

    async fn list_cities(
        &self,
        country_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<City>, WishlistError> {
        let pattern = search.map(substring_pattern);

        sqlx::query_as::<_, City>(
            r#"
            SELECT * FROM cities
            WHERE ($1::uuid IS NULL OR country_id = $1)
              AND ($2::text IS NULL OR name ILIKE $2 ESCAPE '\')
            ORDER BY name ASC
            LIMIT $3
            "#,
        )
        .bind(country_id)
        .bind(pattern)
        .bind(CITY_SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list cities: {}", e);
            WishlistError::DatabaseError(e.to_string())
        })
    }

    async fn find_city(&self, id: Uuid) -> Result<Option<City>, WishlistError> {
        sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch city {}: {}", id, e);
                WishlistError::DatabaseError(e.to_string())
            })
    }

    async fn find_city_detail(&self, id: Uuid) -> Result<Option<CityDetail>, WishlistError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM cities ci
            LEFT JOIN countries co ON co.id = ci.country_id
            LEFT JOIN continents cn ON cn.id = co.continent_id
            WHERE ci.id = $1
            "#,
            CITY_GRAPH_COLUMNS
        );

        let row = sqlx::query_as::<_, CityGraphRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch city detail {}: {}", id, e);
                WishlistError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(CityGraphRow::into_detail))
    }
}

/// `%text%` for ILIKE with the user's own wildcards escaped, so the search
/// is a plain case-insensitive substring match
fn substring_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
