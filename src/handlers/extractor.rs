// src/handlers/extractor.rs
// DOCUMENTATION: Authenticated caller extractor
// PURPOSE: Turn an `Authorization: Bearer <token>` header into a user id

use crate::errors::WishlistError;
use crate::state::AppState;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Caller identity resolved from the bearer token
/// DOCUMENTATION: Add as a handler argument to require authentication
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = WishlistError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, WishlistError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        log::error!("AppState missing from app data");
        WishlistError::InternalError
    })?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| WishlistError::Unauthorized("Missing bearer token".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| WishlistError::Unauthorized("Missing bearer token".to_string()))?;

    let user_id = state.tokens.authenticate(token)?;
    Ok(AuthenticatedUser { user_id })
}
