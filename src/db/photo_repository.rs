// src/db/photo_repository.rs
// DOCUMENTATION: Photo database operations
// PURPOSE: Handle CRUD and ordering for destination photos

use crate::db::PhotoStore;
use crate::errors::WishlistError;
use crate::models::{NewPhoto, OwnedChild, Photo, UpdatePhotoRequest};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct OwnedPhotoRow {
    #[sqlx(flatten)]
    photo: Photo,
    owner_id: Uuid,
}

pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoStore for PgPhotoRepository {
    async fn create(&self, req: &NewPhoto) -> Result<Photo, WishlistError> {
        let photo = sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO photos (
                destination_id, url, caption, original_name, mime_type, sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(req.destination_id)
        .bind(&req.url)
        .bind(&req.caption)
        .bind(&req.original_name)
        .bind(&req.mime_type)
        .bind(req.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create photo: {}", e);
            WishlistError::DatabaseError(format!("Create photo failed: {}", e))
        })?;

        Ok(photo)
    }

    async fn find_with_owner(&self, id: Uuid) -> Result<Option<OwnedChild<Photo>>, WishlistError> {
        let row = sqlx::query_as::<_, OwnedPhotoRow>(
            r#"
            SELECT p.*, d.user_id AS owner_id
            FROM photos p
            JOIN destinations d ON d.id = p.destination_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch photo {}: {}", id, e);
            WishlistError::DatabaseError(format!("Fetch photo failed: {}", e))
        })?;

        Ok(row.map(|r| OwnedChild {
            item: r.photo,
            owner_id: r.owner_id,
        }))
    }

    async fn list_by_destination(&self, destination_id: Uuid) -> Result<Vec<Photo>, WishlistError> {
        sqlx::query_as::<_, Photo>(
            r#"
            SELECT * FROM photos
            WHERE destination_id = $1
            ORDER BY sort_order ASC, created_at DESC
            "#,
        )
        .bind(destination_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch photos for destination {}: {}", destination_id, e);
            WishlistError::DatabaseError(format!("Fetch photos failed: {}", e))
        })
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, WishlistError> {
        sqlx::query_as::<_, Photo>(
            r#"
            UPDATE photos
            SET caption = COALESCE($1, caption)
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(&req.caption)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update photo {}: {}", id, e);
            WishlistError::DatabaseError(format!("Update photo failed: {}", e))
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WishlistError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete photo {}: {}", id, e);
                WishlistError::DatabaseError(format!("Delete photo failed: {}", e))
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
            UPDATE photos
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
            log::error!("Failed to set sort order for photo {}: {}", id, e);
            WishlistError::DatabaseError(format!("Reorder photos failed: {}", e))
        })?;

        Ok(result.rows_affected())
    }
}
