// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for destination photos
// PURPOSE: Raw-body uploads, captions, ordering and serving stored bytes

use crate::errors::WishlistError;
use crate::handlers::AuthenticatedUser;
use crate::models::{PhotoUploadQuery, ReorderRequest, UpdatePhotoRequest};
use crate::services::PhotoUpload;
use crate::state::AppState;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// POST /destinations/{id}/photos?filename=&caption=&sort_order=
/// Body is the image itself; Content-Type must be image/*
pub async fn upload_photo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    query: web::Query<PhotoUploadQuery>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<impl Responder, WishlistError> {
    let query = query.into_inner();
    query.validate()?;

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let photo = state
        .photos
        .upload(
            user.user_id,
            path.into_inner(),
            PhotoUpload {
                content_type,
                bytes: &body,
                query,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(photo))
}

/// GET /destinations/{id}/photos
pub async fn list_photos(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let photos = state.photos.list(user.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// PUT /destinations/{id}/photos/order
pub async fn reorder_photos(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<ReorderRequest>,
) -> Result<impl Responder, WishlistError> {
    let photos = state
        .photos
        .reorder(user.user_id, path.into_inner(), &req.ids)
        .await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// GET /photos/{id}
pub async fn get_photo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let photo = state.photos.get(user.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photo))
}

/// GET /photos/{id}/file
pub async fn get_photo_file(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let file = state
        .photos
        .read_file(user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok()
        .content_type(file.mime_type)
        .body(file.bytes))
}

/// PATCH /photos/{id}
pub async fn update_photo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePhotoRequest>,
) -> Result<impl Responder, WishlistError> {
    req.validate()?;

    let photo = state
        .photos
        .update(user.user_id, path.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(photo))
}

/// DELETE /photos/{id}
pub async fn delete_photo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    state.photos.delete(user.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/destinations/{id}/photos")
            .route(web::get().to(list_photos))
            .route(web::post().to(upload_photo)),
    )
    .route("/destinations/{id}/photos/order", web::put().to(reorder_photos))
    .service(
        web::resource("/photos/{id}")
            .route(web::get().to(get_photo))
            .route(web::patch().to(update_photo))
            .route(web::delete().to(delete_photo)),
    )
    .route("/photos/{id}/file", web::get().to(get_photo_file));
}
