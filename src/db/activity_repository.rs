// src/db/activity_repository.rs
// DOCUMENTATION: Activity database operations
// PURPOSE: Handle CRUD, completion toggling and ordering for destination activities

use crate::db::ActivityStore;
use crate::errors::WishlistError;
use crate::models::{Activity, CreateActivityRequest, OwnedChild, UpdateActivityRequest};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct OwnedActivityRow {
    #[sqlx(flatten)]
    activity: Activity,
    owner_id: Uuid,
}

pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgActivityRepository {
    async fn create(
        &self,
        destination_id: Uuid,
        req: &CreateActivityRequest,
    ) -> Result<Activity, WishlistError> {
        sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (
                destination_id, name, description, category, completed,
                estimated_cost, currency, sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(destination_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.category)
        .bind(req.completed.unwrap_or(false))
        .bind(req.estimated_cost)
        .bind(&req.currency)
        .bind(req.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create activity: {}", e);
            WishlistError::DatabaseError(format!("Create activity failed: {}", e))
        })
    }

    async fn find_with_owner(
        &self,
        id: Uuid,
    ) -> Result<Option<OwnedChild<Activity>>, WishlistError> {
        let row = sqlx::query_as::<_, OwnedActivityRow>(
            r#"
            SELECT a.*, d.user_id AS owner_id
            FROM activities a
            JOIN destinations d ON d.id = a.destination_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch activity {}: {}", id, e);
            WishlistError::DatabaseError(format!("Fetch activity failed: {}", e))
        })?;

        Ok(row.map(|r| OwnedChild {
            item: r.activity,
            owner_id: r.owner_id,
        }))
    }

    async fn list_by_destination(
        &self,
        destination_id: Uuid,
    ) -> Result<Vec<Activity>, WishlistError> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT * FROM activities
            WHERE destination_id = $1
            ORDER BY sort_order ASC, created_at DESC
            "#,
        )
        .bind(destination_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to fetch activities for destination {}: {}",
                destination_id,
                e
            );
            WishlistError::DatabaseError(format!("Fetch activities failed: {}", e))
        })
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdateActivityRequest,
    ) -> Result<Option<Activity>, WishlistError> {
        sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                category = COALESCE($3, category),
                completed = COALESCE($4, completed),
                estimated_cost = COALESCE($5, estimated_cost),
                currency = COALESCE($6, currency),
                updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.category)
        .bind(req.completed)
        .bind(req.estimated_cost)
        .bind(&req.currency)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for activity {}: {}", id, e);
            WishlistError::DatabaseError(format!("Update activity failed: {}", e))
        })
    }

    async fn toggle_completed(&self, id: Uuid) -> Result<Option<Activity>, WishlistError> {
        sqlx::query_as::<_, Activity>(
            "UPDATE activities SET completed = NOT completed WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Toggle failed for activity {}: {}", id, e);
            WishlistError::DatabaseError(format!("Toggle activity failed: {}", e))
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WishlistError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete activity {}: {}", id, e);
                WishlistError::DatabaseError(format!("Delete activity failed: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_sort_order(
        &self,
        destination_id: Uuid,
        id: Uuid,
        sort_order: i32,
    ) -> Result<u64, WishlistError> {
        let result = sqlx::query(
            r#"
            UPDATE activities
            SET sort_order = $1
            WHERE id = $2 AND destination_id = $3
            "#,
        )
        .bind(sort_order)
        .bind(id)
        .bind(destination_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to set sort order for activity {}: {}", id, e);
            WishlistError::DatabaseError(format!("Reorder activities failed: {}", e))
        })?;

        Ok(result.rows_affected())
    }
}
