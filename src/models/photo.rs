// src/models/photo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Photo attached to a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub destination_id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Photo row to insert once the bytes are stored
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub destination_id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub sort_order: i32,
}

/// Query string accompanying a raw-body photo upload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PhotoUploadQuery {
    #[validate(length(min = 1, max = 255))]
    pub filename: Option<String>,

    #[validate(length(max = 500))]
    pub caption: Option<String>,

    pub sort_order: Option<i32>,
}

/// PATCH /photos/{id} body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePhotoRequest {
    #[validate(length(max = 500))]
    pub caption: Option<String>,
}
