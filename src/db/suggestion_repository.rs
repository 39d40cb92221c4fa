// src/db/suggestion_repository.rs
// DOCUMENTATION: Suggested activity cache persistence
// PURPOSE: City-scoped rows written once per city and read back on later requests

use crate::db::SuggestionStore;
use crate::errors::WishlistError;
use crate::models::{NewSuggestedActivity, SuggestedActivity};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgSuggestionRepository {
    pool: PgPool,
}

impl PgSuggestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuggestionStore for PgSuggestionRepository {
    async fn list_by_city(&self, city_id: Uuid) -> Result<Vec<SuggestedActivity>, WishlistError> {
        sqlx::query_as::<_, SuggestedActivity>(
            r#"
            SELECT * FROM suggested_activities
            WHERE city_id = $1
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch suggestions for city {}: {}", city_id, e);
            WishlistError::DatabaseError(e.to_string())
        })
    }

    async fn find(&self, id: Uuid) -> Result<Option<SuggestedActivity>, WishlistError> {
        sqlx::query_as::<_, SuggestedActivity>("SELECT * FROM suggested_activities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch suggestion {}: {}", id, e);
                WishlistError::DatabaseError(e.to_string())
            })
    }

    /// Insert all suggestions for a city in one transaction
    async fn insert_many(
        &self,
        city_id: Uuid,
        suggestions: &[NewSuggestedActivity],
    ) -> Result<Vec<SuggestedActivity>, WishlistError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            log::error!("Failed to begin suggestion transaction: {}", e);
            WishlistError::DatabaseError(e.to_string())
        })?;

        let mut inserted = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            let row = sqlx::query_as::<_, SuggestedActivity>(
                r#"
                INSERT INTO suggested_activities (
                    city_id, name, description, category, estimated_cost,
                    currency, duration, image_url, sort_order
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
                "#,
            )
            .bind(city_id)
            .bind(&suggestion.name)
            .bind(&suggestion.description)
            .bind(suggestion.category.as_str())
            .bind(suggestion.estimated_cost)
            .bind(&suggestion.currency)
            .bind(&suggestion.duration)
            .bind(&suggestion.image_url)
            .bind(suggestion.sort_order)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Failed to insert suggestion {}: {}", suggestion.name, e);
                WishlistError::DatabaseError(e.to_string())
            })?;
            inserted.push(row);
        }

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit suggestions for city {}: {}", city_id, e);
            WishlistError::DatabaseError(e.to_string())
        })?;

        Ok(inserted)
    }

    async fn delete_by_city(&self, city_id: Uuid) -> Result<u64, WishlistError> {
        let result = sqlx::query("DELETE FROM suggested_activities WHERE city_id = $1")
            .bind(city_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to clear suggestions for city {}: {}", city_id, e);
                WishlistError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }
}
