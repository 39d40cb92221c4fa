// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod activity;
pub mod destination;
pub mod geography;
pub mod photo;
pub mod stats;
pub mod suggestion;
pub mod user;

pub use activity::*;
pub use destination::*;
pub use geography::*;
pub use photo::*;
pub use stats::*;
pub use suggestion::*;
pub use user::*;
