// src/handlers/destinations.rs
// DOCUMENTATION: HTTP handlers for destinations
// PURPOSE: Parse requests, call the destination service, return responses

use crate::errors::WishlistError;
use crate::handlers::AuthenticatedUser;
use crate::models::{CreateDestinationRequest, DestinationListQuery, UpdateDestinationRequest};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// POST /destinations
pub async fn create_destination(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateDestinationRequest>,
) -> Result<impl Responder, WishlistError> {
    req.validate()?;

    let destination = state
        .destinations
        .create(user.user_id, req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(destination))
}

/// GET /destinations?continent_id=|country_id=
/// Full graphs, most recent first
pub async fn list_destinations(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<DestinationListQuery>,
) -> Result<impl Responder, WishlistError> {
    let destinations = state
        .destinations
        .list(user.user_id, query.to_filter())
        .await?;
    Ok(HttpResponse::Ok().json(destinations))
}

/// GET /destinations/stats
pub async fn destination_stats(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, WishlistError> {
    let stats = state.destinations.stats(user.user_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// GET /destinations/{id}
pub async fn get_destination(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let destination = state
        .destinations
        .get(user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(destination))
}

/// PATCH /destinations/{id}
pub async fn update_destination(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateDestinationRequest>,
) -> Result<impl Responder, WishlistError> {
    req.validate()?;

    let destination = state
        .destinations
        .update(user.user_id, path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(destination))
}

/// DELETE /destinations/{id}
/// Removes photos and activities with it
pub async fn delete_destination(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    state
        .destinations
        .delete(user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    // /stats before /{id}
    cfg.service(
        web::resource("/destinations")
            .route(web::get().to(list_destinations))
            .route(web::post().to(create_destination)),
    )
    .route("/destinations/stats", web::get().to(destination_stats))
    .service(
        web::resource("/destinations/{id}")
            .route(web::get().to(get_destination))
            .route(web::patch().to(update_destination))
            .route(web::delete().to(delete_destination)),
    );
}
