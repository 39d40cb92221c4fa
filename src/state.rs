// src/state.rs
// DOCUMENTATION: Shared application state
// PURPOSE: Wire storage backends into services once at startup and share them
// across actix workers through web::Data

use crate::config::Config;
use crate::db::*;
use crate::services::*;
use sqlx::PgPool;
use std::sync::Arc;

/// One handle per storage trait
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub geography: Arc<dyn GeographyStore>,
    pub destinations: Arc<dyn DestinationStore>,
    pub photos: Arc<dyn PhotoStore>,
    pub activities: Arc<dyn ActivityStore>,
    pub suggestions: Arc<dyn SuggestionStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            geography: Arc::new(PgGeographyRepository::new(pool.clone())),
            destinations: Arc::new(PgDestinationRepository::new(pool.clone())),
            photos: Arc::new(PgPhotoRepository::new(pool.clone())),
            activities: Arc::new(PgActivityRepository::new(pool.clone())),
            suggestions: Arc::new(PgSuggestionRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn memory(store: Arc<memory::MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            geography: store.clone(),
            destinations: store.clone(),
            photos: store.clone(),
            activities: store.clone(),
            suggestions: store,
        }
    }
}

pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub users: UserService,
    pub geography: GeographyService,
    pub destinations: DestinationService,
    pub photos: PhotoService,
    pub activities: ActivityService,
    pub suggestions: SuggestionService,
}

impl AppState {
    pub fn new(
        stores: Stores,
        files: Arc<dyn FileStore>,
        places: Arc<dyn PlacesSource>,
        config: &Config,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(
            config.signing_secret().to_string(),
            config.jwt_expiration_secs,
        ));

        Self {
            users: UserService::new(stores.users.clone(), tokens.clone()),
            geography: GeographyService::new(stores.geography.clone()),
            destinations: DestinationService::new(
                stores.destinations.clone(),
                stores.geography.clone(),
                stores.photos.clone(),
                files.clone(),
            ),
            photos: PhotoService::new(
                stores.destinations.clone(),
                stores.photos.clone(),
                files,
                config.max_upload_bytes,
            ),
            activities: ActivityService::new(stores.destinations.clone(), stores.activities.clone()),
            suggestions: SuggestionService::new(
                stores.geography.clone(),
                stores.destinations.clone(),
                stores.activities.clone(),
                stores.suggestions.clone(),
                places,
                config.suggestion_radius_m,
            ),
            tokens,
        }
    }

    /// Production wiring: PostgreSQL, local disk and Geoapify
    pub fn from_config(pool: PgPool, config: &Config) -> Self {
        let files = Arc::new(LocalFileStore::new(
            config.upload_dir.clone(),
            &config.upload_public_prefix,
        ));
        let places = Arc::new(GeoapifyClient::new(config.geoapify_api_key.clone()));

        Self::new(Stores::postgres(pool), files, places, config)
    }
}
