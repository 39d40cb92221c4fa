// src/handlers/auth.rs
// DOCUMENTATION: HTTP handlers for registration and login
// PURPOSE: Public endpoints that hand out bearer tokens

use crate::errors::WishlistError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<impl Responder, WishlistError> {
    req.validate()?;

    let auth = state.users.register(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(auth))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<impl Responder, WishlistError> {
    req.validate()?;

    let auth = state.users.login(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(auth))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/register", web::post().to(register))
        .route("/auth/login", web::post().to(login));
}
