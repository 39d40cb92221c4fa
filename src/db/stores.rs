// src/db/stores.rs
// DOCUMENTATION: Storage traits consumed by the services
// PURPOSE: Keep business logic independent of PostgreSQL so it can be
// exercised against the in-memory store in tests

use crate::errors::WishlistError;
use crate::models::*;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account; Conflict when the email is taken
    async fn create(&self, user: &NewUser) -> Result<User, WishlistError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WishlistError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WishlistError>;

    /// Shallow merge of profile fields; None when the user does not exist
    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<Option<User>, WishlistError>;
}

#[async_trait]
pub trait GeographyStore: Send + Sync {
    async fn list_continents(&self) -> Result<Vec<Continent>, WishlistError>;

    async fn list_countries(
        &self,
        continent_id: Option<Uuid>,
    ) -> Result<Vec<Country>, WishlistError>;

    async fn list_cities(
        &self,
        country_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<City>, WishlistError>;

    async fn find_city(&self, id: Uuid) -> Result<Option<City>, WishlistError>;

    async fn find_city_detail(&self, id: Uuid) -> Result<Option<CityDetail>, WishlistError>;
}

#[async_trait]
pub trait DestinationStore: Send + Sync {
    async fn find_by_user_and_city(
        &self,
        user_id: Uuid,
        city_id: Uuid,
    ) -> Result<Option<Destination>, WishlistError>;

    /// Insert a destination; Conflict when (user_id, city_id) already exists
    async fn create(
        &self,
        user_id: Uuid,
        req: &CreateDestinationRequest,
    ) -> Result<Destination, WishlistError>;

    /// Lookup filtered by owner: another user's destination is simply absent
    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Destination>, WishlistError>;

    async fn find_detail(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<DestinationDetail>, WishlistError>;

    /// Full graphs, most recently created first
    async fn list_details(
        &self,
        user_id: Uuid,
        filter: DestinationFilter,
    ) -> Result<Vec<DestinationDetail>, WishlistError>;

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        req: &UpdateDestinationRequest,
    ) -> Result<Option<Destination>, WishlistError>;

    /// Deletes the destination and, by cascade, its photos and activities
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, WishlistError>;
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn create(&self, photo: &NewPhoto) -> Result<Photo, WishlistError>;

    /// Lookup by id only; the caller checks `owner_id`
    async fn find_with_owner(&self, id: Uuid) -> Result<Option<OwnedChild<Photo>>, WishlistError>;

    /// Ordered by sort_order ascending, newest first on ties
    async fn list_by_destination(&self, destination_id: Uuid) -> Result<Vec<Photo>, WishlistError>;

    async fn update(
        &self,
        id: Uuid,
        req: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, WishlistError>;

    async fn delete(&self, id: Uuid) -> Result<bool, WishlistError>;

    /// Returns affected rows; ids outside the destination affect nothing
    async fn set_sort_order(
        &self,
        destination_id: Uuid,
        id: Uuid,
        sort_order: i32,
    ) -> Result<u64, WishlistError>;
}

#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn create(
        &self,
        destination_id: Uuid,
        req: &CreateActivityRequest,
    ) -> Result<Activity, WishlistError>;

    async fn find_with_owner(
        &self,
        id: Uuid,
    ) -> Result<Option<OwnedChild<Activity>>, WishlistError>;

    async fn list_by_destination(
        &self,
        destination_id: Uuid,
    ) -> Result<Vec<Activity>, WishlistError>;

    async fn update(
        &self,
        id: Uuid,
        req: &UpdateActivityRequest,
    ) -> Result<Option<Activity>, WishlistError>;

    /// Flip `completed` in place, nothing else changes
    async fn toggle_completed(&self, id: Uuid) -> Result<Option<Activity>, WishlistError>;

    async fn delete(&self, id: Uuid) -> Result<bool, WishlistError>;

    async fn set_sort_order(
        &self,
        destination_id: Uuid,
        id: Uuid,
        sort_order: i32,
    ) -> Result<u64, WishlistError>;
}

#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn list_by_city(&self, city_id: Uuid) -> Result<Vec<SuggestedActivity>, WishlistError>;

    async fn find(&self, id: Uuid) -> Result<Option<SuggestedActivity>, WishlistError>;

    async fn insert_many(
        &self,
        city_id: Uuid,
        suggestions: &[NewSuggestedActivity],
    ) -> Result<Vec<SuggestedActivity>, WishlistError>;

    async fn delete_by_city(&self, city_id: Uuid) -> Result<u64, WishlistError>;
}
