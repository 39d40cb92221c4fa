// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod activity_service;
pub mod auth_service;
pub mod destination_service;
pub mod file_store;
pub mod geoapify_client;
pub mod geography_service;
pub mod ownership;
pub mod photo_service;
pub mod stats_service;
pub mod suggestion_service;
pub mod user_service;

pub use activity_service::*;
pub use auth_service::*;
pub use destination_service::*;
pub use file_store::{FileStore, LocalFileStore};
pub use geoapify_client::*;
pub use geography_service::*;
pub use ownership::*;
pub use photo_service::*;
pub use stats_service::*;
pub use suggestion_service::*;
pub use user_service::*;
