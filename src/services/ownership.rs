// src/services/ownership.rs
// DOCUMENTATION: Ownership guard shared by every service
// PURPOSE: Resolve a resource for the caller and tell "absent" apart from "not yours"

use crate::db::DestinationStore;
use crate::errors::WishlistError;
use crate::models::{Destination, OwnedChild};
use uuid::Uuid;

/// Load a destination through the owner-scoped lookup
/// DOCUMENTATION: Another user's destination is indistinguishable from a
/// missing one here, so the failure is always NotFound
pub async fn require_destination(
    destinations: &dyn DestinationStore,
    destination_id: Uuid,
    user_id: Uuid,
) -> Result<Destination, WishlistError> {
    destinations
        .find_for_user(destination_id, user_id)
        .await?
        .ok_or_else(|| WishlistError::NotFound(format!("Destination {} not found", destination_id)))
}

/// Check a child row that was loaded by id only
/// DOCUMENTATION: Missing row -> NotFound, row under another user's
/// destination -> Forbidden
pub fn require_owner<T>(
    child: Option<OwnedChild<T>>,
    user_id: Uuid,
    kind: &str,
    id: Uuid,
) -> Result<T, WishlistError> {
    match child {
        None => Err(WishlistError::NotFound(format!("{} {} not found", kind, id))),
        Some(owned) if owned.owner_id != user_id => {
            log::warn!(
                "User {} attempted to access {} {} owned by {}",
                user_id,
                kind.to_lowercase(),
                id,
                owned.owner_id
            );
            Err(WishlistError::Forbidden(format!(
                "{} {} belongs to another user",
                kind, id
            )))
        }
        Some(owned) => Ok(owned.item),
    }
}
