// src/services/activity_service.rs
// DOCUMENTATION: Business logic for destination activities
// PURPOSE: Planned tasks per destination: CRUD, completion toggle and ordering

use crate::db::{ActivityStore, DestinationStore};
use crate::errors::WishlistError;
use crate::models::{Activity, CreateActivityRequest, UpdateActivityRequest};
use crate::services::{require_destination, require_owner};
use std::sync::Arc;
use uuid::Uuid;

const KIND: &str = "Activity";

pub struct ActivityService {
    destinations: Arc<dyn DestinationStore>,
    activities: Arc<dyn ActivityStore>,
}

impl ActivityService {
    pub fn new(destinations: Arc<dyn DestinationStore>, activities: Arc<dyn ActivityStore>) -> Self {
        Self {
            destinations,
            activities,
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        destination_id: Uuid,
        req: CreateActivityRequest,
    ) -> Result<Activity, WishlistError> {
        require_destination(self.destinations.as_ref(), destination_id, user_id).await?;
        let activity = self.activities.create(destination_id, &req).await?;
        log::info!("Added activity {} to destination {}", activity.id, destination_id);
        Ok(activity)
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        destination_id: Uuid,
    ) -> Result<Vec<Activity>, WishlistError> {
        require_destination(self.destinations.as_ref(), destination_id, user_id).await?;
        self.activities.list_by_destination(destination_id).await
    }

    pub async fn get(&self, user_id: Uuid, activity_id: Uuid) -> Result<Activity, WishlistError> {
        let owned = self.activities.find_with_owner(activity_id).await?;
        require_owner(owned, user_id, KIND, activity_id)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
        req: UpdateActivityRequest,
    ) -> Result<Activity, WishlistError> {
        self.get(user_id, activity_id).await?;
        self.activities
            .update(activity_id, &req)
            .await?
            .ok_or_else(|| WishlistError::NotFound(format!("Activity {} not found", activity_id)))
    }

    /// Flip `completed`; nothing else on the row changes
    pub async fn toggle(&self, user_id: Uuid, activity_id: Uuid) -> Result<Activity, WishlistError> {
        self.get(user_id, activity_id).await?;
        self.activities
            .toggle_completed(activity_id)
            .await?
            .ok_or_else(|| WishlistError::NotFound(format!("Activity {} not found", activity_id)))
    }

    pub async fn delete(&self, user_id: Uuid, activity_id: Uuid) -> Result<(), WishlistError> {
        self.get(user_id, activity_id).await?;
        if !self.activities.delete(activity_id).await? {
            return Err(WishlistError::NotFound(format!(
                "Activity {} not found",
                activity_id
            )));
        }
        Ok(())
    }

    /// Same contract as photo reordering: sequential, unvalidated, not atomic
    pub async fn reorder(
        &self,
        user_id: Uuid,
        destination_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<Activity>, WishlistError> {
        require_destination(self.destinations.as_ref(), destination_id, user_id).await?;

        for (position, id) in ids.iter().enumerate() {
            self.activities
                .set_sort_order(destination_id, *id, position as i32)
                .await?;
        }

        self.activities.list_by_destination(destination_id).await
    }
}
