// src/handlers/activities.rs
// DOCUMENTATION: HTTP handlers for destination activities

use crate::errors::WishlistError;
use crate::handlers::AuthenticatedUser;
use crate::models::{CreateActivityRequest, ReorderRequest, UpdateActivityRequest};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// POST /destinations/{id}/activities
pub async fn create_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<CreateActivityRequest>,
) -> Result<impl Responder, WishlistError> {
    req.validate()?;

    let activity = state
        .activities
        .create(user.user_id, path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(activity))
}

/// GET /destinations/{id}/activities
pub async fn list_activities(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let activities = state
        .activities
        .list(user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(activities))
}

/// PUT /destinations/{id}/activities/order
pub async fn reorder_activities(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<ReorderRequest>,
) -> Result<impl Responder, WishlistError> {
    let activities = state
        .activities
        .reorder(user.user_id, path.into_inner(), &req.ids)
        .await?;
    Ok(HttpResponse::Ok().json(activities))
}

/// GET /activities/{id}
pub async fn get_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let activity = state.activities.get(user.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(activity))
}

/// PATCH /activities/{id}
pub async fn update_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateActivityRequest>,
) -> Result<impl Responder, WishlistError> {
    req.validate()?;

    let activity = state
        .activities
        .update(user.user_id, path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(activity))
}

/// POST /activities/{id}/toggle
pub async fn toggle_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let activity = state
        .activities
        .toggle(user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(activity))
}

/// DELETE /activities/{id}
pub async fn delete_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    state
        .activities
        .delete(user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/destinations/{id}/activities")
            .route(web::get().to(list_activities))
            .route(web::post().to(create_activity)),
    )
    .route(
        "/destinations/{id}/activities/order",
        web::put().to(reorder_activities),
    )
    .service(
        web::resource("/activities/{id}")
            .route(web::get().to(get_activity))
            .route(web::patch().to(update_activity))
            .route(web::delete().to(delete_activity)),
    )
    .route("/activities/{id}/toggle", web::post().to(toggle_activity));
}
