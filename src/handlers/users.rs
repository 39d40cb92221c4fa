// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for the caller's own profile

use crate::errors::WishlistError;
use crate::handlers::AuthenticatedUser;
use crate::models::UpdateProfileRequest;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// GET /users/me
pub async fn get_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, WishlistError> {
    let profile = state.users.get_profile(user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PATCH /users/me
pub async fn update_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, WishlistError> {
    req.validate()?;

    let profile = state
        .users
        .update_profile(user.user_id, req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users/me")
            .route(web::get().to(get_me))
            .route(web::patch().to(update_me)),
    );
}
