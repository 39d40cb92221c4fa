// src/services/photo_service.rs
// DOCUMENTATION: Business logic for destination photos
// PURPOSE: Upload, caption, reorder and delete photos, keeping rows and files in step

use crate::db::{DestinationStore, PhotoStore};
use crate::errors::WishlistError;
use crate::models::{NewPhoto, Photo, PhotoUploadQuery, UpdatePhotoRequest};
use crate::services::{require_destination, require_owner, FileStore};
use std::sync::Arc;
use uuid::Uuid;

const KIND: &str = "Photo";

/// Raw upload as received from the HTTP layer
pub struct PhotoUpload<'a> {
    pub content_type: Option<&'a str>,
    pub bytes: &'a [u8],
    pub query: PhotoUploadQuery,
}

/// Photo bytes together with the MIME type to serve them with
pub struct PhotoFile {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

pub struct PhotoService {
    destinations: Arc<dyn DestinationStore>,
    photos: Arc<dyn PhotoStore>,
    files: Arc<dyn FileStore>,
    max_upload_bytes: usize,
}

impl PhotoService {
    pub fn new(
        destinations: Arc<dyn DestinationStore>,
        photos: Arc<dyn PhotoStore>,
        files: Arc<dyn FileStore>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            destinations,
            photos,
            files,
            max_upload_bytes,
        }
    }

    /// Store the bytes, then insert the row
    /// DOCUMENTATION: If the insert fails the stored file is removed again
    pub async fn upload(
        &self,
        user_id: Uuid,
        destination_id: Uuid,
        upload: PhotoUpload<'_>,
    ) -> Result<Photo, WishlistError> {
        require_destination(self.destinations.as_ref(), destination_id, user_id).await?;

        let mime_type = image_mime_type(upload.content_type)?;
        if upload.bytes.is_empty() {
            return Err(WishlistError::ValidationError(
                "Photo upload is empty".to_string(),
            ));
        }
        if upload.bytes.len() > self.max_upload_bytes {
            return Err(WishlistError::ValidationError(format!(
                "Photo exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }

        let original_name = upload
            .query
            .filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let suggested_name = original_name
            .clone()
            .unwrap_or_else(|| format!("photo.{}", extension_for(&mime_type)));

        let url = self.files.save(upload.bytes, &suggested_name).await?;

        let new_photo = NewPhoto {
            destination_id,
            url: url.clone(),
            caption: upload.query.caption,
            original_name,
            mime_type: Some(mime_type),
            sort_order: upload.query.sort_order.unwrap_or(0),
        };

        match self.photos.create(&new_photo).await {
            Ok(photo) => {
                log::info!("Uploaded photo {} to destination {}", photo.id, destination_id);
                Ok(photo)
            }
            Err(e) => {
                if let Err(cleanup) = self.files.delete(&url).await {
                    log::warn!("Could not remove orphaned upload {}: {}", url, cleanup);
                }
                Err(e)
            }
        }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        destination_id: Uuid,
    ) -> Result<Vec<Photo>, WishlistError> {
        require_destination(self.destinations.as_ref(), destination_id, user_id).await?;
        self.photos.list_by_destination(destination_id).await
    }

    pub async fn get(&self, user_id: Uuid, photo_id: Uuid) -> Result<Photo, WishlistError> {
        let owned = self.photos.find_with_owner(photo_id).await?;
        require_owner(owned, user_id, KIND, photo_id)
    }

    pub async fn read_file(&self, user_id: Uuid, photo_id: Uuid) -> Result<PhotoFile, WishlistError> {
        let photo = self.get(user_id, photo_id).await?;
        let bytes = self.files.read(&photo.url).await?;

        Ok(PhotoFile {
            bytes,
            mime_type: photo
                .mime_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        })
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        photo_id: Uuid,
        req: UpdatePhotoRequest,
    ) -> Result<Photo, WishlistError> {
        self.get(user_id, photo_id).await?;
        self.photos
            .update(photo_id, &req)
            .await?
            .ok_or_else(|| WishlistError::NotFound(format!("Photo {} not found", photo_id)))
    }

    /// Remove the row, then its file; file errors are only logged
    pub async fn delete(&self, user_id: Uuid, photo_id: Uuid) -> Result<(), WishlistError> {
        let photo = self.get(user_id, photo_id).await?;

        if !self.photos.delete(photo_id).await? {
            return Err(WishlistError::NotFound(format!("Photo {} not found", photo_id)));
        }

        if let Err(e) = self.files.delete(&photo.url).await {
            log::warn!("Could not remove file {} of photo {}: {}", photo.url, photo_id, e);
        }
        Ok(())
    }

    /// Assign sort_order = position in `ids`, one update per id
    /// DOCUMENTATION: Not atomic. Ids outside the destination match no row and
    /// are skipped, photos missing from `ids` keep their previous order.
    pub async fn reorder(
        &self,
        user_id: Uuid,
        destination_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<Photo>, WishlistError> {
        require_destination(self.destinations.as_ref(), destination_id, user_id).await?;

        for (position, id) in ids.iter().enumerate() {
            let updated = self
                .photos
                .set_sort_order(destination_id, *id, position as i32)
                .await?;
            if updated == 0 {
                log::debug!("Reorder skipped photo {} (not in destination {})", id, destination_id);
            }
        }

        self.photos.list_by_destination(destination_id).await
    }
}

/// Accept only image/* content types, dropping any parameters
fn image_mime_type(content_type: Option<&str>) -> Result<String, WishlistError> {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();

    match mime.strip_prefix("image/") {
        Some(subtype) if !subtype.is_empty() => Ok(mime),
        _ => Err(WishlistError::ValidationError(format!(
            "Unsupported photo content type '{}'",
            content_type.unwrap_or("")
        ))),
    }
}

fn extension_for(mime_type: &str) -> &str {
    match mime_type {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/svg+xml" => "svg",
        other => other.strip_prefix("image/").unwrap_or("bin"),
    }
}
