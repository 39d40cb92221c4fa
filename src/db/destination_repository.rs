// src/db/destination_repository.rs
// DOCUMENTATION: Destination aggregate database operations
// PURPOSE: Owner-scoped CRUD plus the eager city/country/continent/photos/activities read

use crate::db::geography_repository::{CityGraphRow, CITY_GRAPH_COLUMNS};
use crate::db::{is_unique_violation, DestinationStore};
use crate::errors::WishlistError;
use crate::models::*;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

/// Destination columns joined with its city graph
/// DOCUMENTATION: `city_id` is read once, from the joined city
#[derive(Debug, FromRow)]
struct DestinationGraphRow {
    #[sqlx(flatten)]
    destination: Destination,
    #[sqlx(flatten)]
    city: CityGraphRow,
}

pub struct PgDestinationRepository {
    pool: PgPool,
}

impl PgDestinationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the graph query with an optional extra predicate bound to $2
    async fn fetch_graph(
        &self,
        user_id: Uuid,
        predicate: Option<(&str, Uuid)>,
    ) -> Result<Vec<DestinationDetail>, WishlistError> {
        let extra = predicate.map(|(clause, _)| clause).unwrap_or("");
        let sql = format!(
            r#"
            SELECT
                d.id, d.user_id, d.notes, d.visited, d.visited_date, d.planned_date,
                d.priority, d.created_at, d.updated_at,
                {}
            FROM destinations d
            JOIN cities ci ON ci.id = d.city_id
            LEFT JOIN countries co ON co.id = ci.country_id
            LEFT JOIN continents cn ON cn.id = co.continent_id
            WHERE d.user_id = $1 {}
            ORDER BY d.created_at DESC
            "#,
            CITY_GRAPH_COLUMNS, extra
        );

        let mut query = sqlx::query_as::<_, DestinationGraphRow>(&sql).bind(user_id);
        if let Some((_, value)) = predicate {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            log::error!("Failed to fetch destinations for user {}: {}", user_id, e);
            WishlistError::DatabaseError(e.to_string())
        })?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.destination.id).collect();
        let mut photos = self.photos_by_destination(&ids).await?;
        let mut activities = self.activities_by_destination(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.destination.id;
                DestinationDetail {
                    destination: row.destination,
                    city: row.city.into_detail(),
                    photos: photos.remove(&id).unwrap_or_default(),
                    activities: activities.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn photos_by_destination(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Photo>>, WishlistError> {
        let photos = sqlx::query_as::<_, Photo>(
            r#"
            SELECT * FROM photos
            WHERE destination_id = ANY($1)
            ORDER BY sort_order ASC, created_at DESC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch photos for destinations: {}", e);
            WishlistError::DatabaseError(e.to_string())
        })?;

        let mut grouped: HashMap<Uuid, Vec<Photo>> = HashMap::new();
        for photo in photos {
            grouped.entry(photo.destination_id).or_default().push(photo);
        }
        Ok(grouped)
    }

    async fn activities_by_destination(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Activity>>, WishlistError> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT * FROM activities
            WHERE destination_id = ANY($1)
            ORDER BY sort_order ASC, created_at DESC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch activities for destinations: {}", e);
            WishlistError::DatabaseError(e.to_string())
        })?;

        let mut grouped: HashMap<Uuid, Vec<Activity>> = HashMap::new();
        for activity in activities {
            grouped.entry(activity.destination_id).or_default().push(activity);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl DestinationStore for PgDestinationRepository {
    async fn find_by_user_and_city(
        &self,
        user_id: Uuid,
        city_id: Uuid,
    ) -> Result<Option<Destination>, WishlistError> {
        sqlx::query_as::<_, Destination>(
            "SELECT * FROM destinations WHERE user_id = $1 AND city_id = $2",
        )
        .bind(user_id)
        .bind(city_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to check existing destination: {}", e);
            WishlistError::DatabaseError(e.to_string())
        })
    }

    async fn create(
        &self,
        user_id: Uuid,
        req: &CreateDestinationRequest,
    ) -> Result<Destination, WishlistError> {
        sqlx::query_as::<_, Destination>(
            r#"
            INSERT INTO destinations (
                user_id, city_id, notes, visited, visited_date, planned_date, priority
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(req.city_id)
        .bind(&req.notes)
        .bind(req.visited.unwrap_or(false))
        .bind(req.visited_date)
        .bind(req.planned_date)
        .bind(req.priority.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Concurrent create for the same pair loses on the unique constraint
            if is_unique_violation(&e) {
                return WishlistError::Conflict("City is already in your destinations".to_string());
            }
            log::error!("Failed to create destination: {}", e);
            WishlistError::DatabaseError(e.to_string())
        })
    }

    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Destination>, WishlistError> {
        sqlx::query_as::<_, Destination>(
            "SELECT * FROM destinations WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch destination {}: {}", id, e);
            WishlistError::DatabaseError(e.to_string())
        })
    }

    async fn find_detail(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<DestinationDetail>, WishlistError> {
        let mut details = self.fetch_graph(user_id, Some(("AND d.id = $2", id))).await?;
        Ok(details.pop())
    }

    async fn list_details(
        &self,
        user_id: Uuid,
        filter: DestinationFilter,
    ) -> Result<Vec<DestinationDetail>, WishlistError> {
        let predicate = match filter {
            DestinationFilter::All => None,
            DestinationFilter::Continent(id) => Some(("AND cn.id = $2", id)),
            DestinationFilter::Country(id) => Some(("AND co.id = $2", id)),
        };
        self.fetch_graph(user_id, predicate).await
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        req: &UpdateDestinationRequest,
    ) -> Result<Option<Destination>, WishlistError> {
        sqlx::query_as::<_, Destination>(
            r#"
            UPDATE destinations
            SET notes = COALESCE($1, notes),
                visited = COALESCE($2, visited),
                visited_date = COALESCE($3, visited_date),
                planned_date = COALESCE($4, planned_date),
                priority = COALESCE($5, priority),
                updated_at = NOW()
            WHERE id = $6 AND user_id = $7
            RETURNING *
            "#,
        )
        .bind(&req.notes)
        .bind(req.visited)
        .bind(req.visited_date)
        .bind(req.planned_date)
        .bind(req.priority)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for destination {}: {}", id, e);
            WishlistError::DatabaseError(e.to_string())
        })
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, WishlistError> {
        let rows = sqlx::query("DELETE FROM destinations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for destination {}: {}", id, e);
                WishlistError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        Ok(rows > 0)
    }
}
