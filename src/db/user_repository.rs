// src/db/user_repository.rs
// DOCUMENTATION: User account database operations
// PURPOSE: Identity store backed by the users table

use crate::db::{is_unique_violation, UserStore};
use crate::errors::WishlistError;
use crate::models::{NewUser, UpdateProfileRequest, User};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, WishlistError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return WishlistError::Conflict(format!("Email {} is already registered", user.email));
            }
            log::error!("Failed to create user: {}", e);
            WishlistError::DatabaseError(e.to_string())
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WishlistError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user by email: {}", e);
                WishlistError::DatabaseError(e.to_string())
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WishlistError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user {}: {}", id, e);
                WishlistError::DatabaseError(e.to_string())
            })
    }

    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<Option<User>, WishlistError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                profile_picture_url = COALESCE($3, profile_picture_url),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.profile_picture_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for user {}: {}", id, e);
            WishlistError::DatabaseError(e.to_string())
        })
    }
}
