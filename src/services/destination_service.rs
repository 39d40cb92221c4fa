// src/services/destination_service.rs
// DOCUMENTATION: Business logic for destinations
// PURPOSE: Create, read, update and delete a user's destination aggregate

use crate::db::{DestinationStore, GeographyStore, PhotoStore};
use crate::errors::WishlistError;
use crate::models::{
    CreateDestinationRequest, Destination, DestinationDetail, DestinationFilter, DestinationStats,
    UpdateDestinationRequest,
};
use crate::services::{compute_stats, require_destination, FileStore};
use std::sync::Arc;
use uuid::Uuid;

pub struct DestinationService {
    destinations: Arc<dyn DestinationStore>,
    geography: Arc<dyn GeographyStore>,
    photos: Arc<dyn PhotoStore>,
    files: Arc<dyn FileStore>,
}

impl DestinationService {
    pub fn new(
        destinations: Arc<dyn DestinationStore>,
        geography: Arc<dyn GeographyStore>,
        photos: Arc<dyn PhotoStore>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            destinations,
            geography,
            photos,
            files,
        }
    }

    /// Add a city to the caller's destinations
    /// DOCUMENTATION: Unknown city -> NotFound, city already added -> Conflict.
    /// The unique constraint on (user_id, city_id) turns a concurrent
    /// double-create into Conflict as well.
    pub async fn create(
        &self,
        user_id: Uuid,
        req: CreateDestinationRequest,
    ) -> Result<Destination, WishlistError> {
        if self.geography.find_city(req.city_id).await?.is_none() {
            return Err(WishlistError::NotFound(format!(
                "City {} not found",
                req.city_id
            )));
        }

        if self
            .destinations
            .find_by_user_and_city(user_id, req.city_id)
            .await?
            .is_some()
        {
            return Err(WishlistError::Conflict(
                "City is already in your destinations".to_string(),
            ));
        }

        let destination = self.destinations.create(user_id, &req).await?;
        log::info!(
            "User {} added destination {} (city {})",
            user_id,
            destination.id,
            destination.city_id
        );
        Ok(destination)
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<DestinationDetail, WishlistError> {
        self.destinations
            .find_detail(id, user_id)
            .await?
            .ok_or_else(|| WishlistError::NotFound(format!("Destination {} not found", id)))
    }

    /// Most recently created first
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: DestinationFilter,
    ) -> Result<Vec<DestinationDetail>, WishlistError> {
        self.destinations.list_details(user_id, filter).await
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        req: UpdateDestinationRequest,
    ) -> Result<Destination, WishlistError> {
        self.destinations
            .update(id, user_id, &req)
            .await?
            .ok_or_else(|| WishlistError::NotFound(format!("Destination {} not found", id)))
    }

    /// Delete the aggregate, then the photo files it referenced
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), WishlistError> {
        let destination = require_destination(self.destinations.as_ref(), id, user_id).await?;
        let photos = self.photos.list_by_destination(destination.id).await?;

        if !self.destinations.delete(id, user_id).await? {
            return Err(WishlistError::NotFound(format!("Destination {} not found", id)));
        }

        for photo in &photos {
            if let Err(e) = self.files.delete(&photo.url).await {
                log::warn!("Could not remove file {} of photo {}: {}", photo.url, photo.id, e);
            }
        }

        log::info!(
            "User {} deleted destination {} ({} photos removed)",
            user_id,
            id,
            photos.len()
        );
        Ok(())
    }

    pub async fn stats(&self, user_id: Uuid) -> Result<DestinationStats, WishlistError> {
        let destinations = self
            .destinations
            .list_details(user_id, DestinationFilter::All)
            .await?;
        Ok(compute_stats(&destinations))
    }
}
