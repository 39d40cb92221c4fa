// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Storage traits, PostgreSQL repositories and the test-only in-memory store

pub mod activity_repository;
pub mod destination_repository;
pub mod geography_repository;
#[cfg(test)]
pub mod memory;
pub mod photo_repository;
pub mod stores;
pub mod suggestion_repository;
pub mod user_repository;

pub use activity_repository::*;
pub use destination_repository::*;
pub use geography_repository::PgGeographyRepository;
pub use photo_repository::*;
pub use stores::*;
pub use suggestion_repository::*;
pub use user_repository::*;

/// SQLSTATE 23505: unique_violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
