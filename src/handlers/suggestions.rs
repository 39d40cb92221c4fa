// src/handlers/suggestions.rs
// DOCUMENTATION: Destination-scoped suggestion endpoints

use crate::errors::WishlistError;
use crate::handlers::AuthenticatedUser;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

/// GET /destinations/{id}/suggestions
/// Suggestions for the destination's city
pub async fn destination_suggestions(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let suggestions = state
        .suggestions
        .for_destination(user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(suggestions))
}

/// POST /destinations/{id}/suggestions/{suggestion_id}/adopt
/// Copy a suggestion into the destination's activities
pub async fn adopt_suggestion(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, WishlistError> {
    let (destination_id, suggestion_id) = path.into_inner();
    let activity = state
        .suggestions
        .adopt(user.user_id, destination_id, suggestion_id)
        .await?;
    Ok(HttpResponse::Created().json(activity))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/destinations/{id}/suggestions",
        web::get().to(destination_suggestions),
    )
    .route(
        "/destinations/{id}/suggestions/{suggestion_id}/adopt",
        web::post().to(adopt_suggestion),
    );
}
