// src/handlers/geography.rs
// DOCUMENTATION: HTTP handlers for the geography catalog
// PURPOSE: Continents, countries and cities, plus city-level suggestions

use crate::errors::WishlistError;
use crate::handlers::AuthenticatedUser;
use crate::models::{CityQuery, CountryQuery};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

/// GET /continents
pub async fn list_continents(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, WishlistError> {
    let continents = state.geography.list_continents().await?;
    Ok(HttpResponse::Ok().json(continents))
}

/// GET /countries?continent_id=
pub async fn list_countries(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    query: web::Query<CountryQuery>,
) -> Result<impl Responder, WishlistError> {
    let countries = state.geography.list_countries(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(countries))
}

/// GET /cities?country_id=&q=
pub async fn list_cities(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    query: web::Query<CityQuery>,
) -> Result<impl Responder, WishlistError> {
    let cities = state.geography.list_cities(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cities))
}

/// GET /cities/{id}
pub async fn get_city(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let city = state.geography.get_city(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// GET /cities/{id}/suggestions
/// Served from the city cache, populated on first request
pub async fn city_suggestions(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let suggestions = state.suggestions.for_city(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(suggestions))
}

/// POST /cities/{id}/suggestions/refresh
pub async fn refresh_city_suggestions(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, WishlistError> {
    let suggestions = state.suggestions.refresh(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(suggestions))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/continents", web::get().to(list_continents))
        .route("/countries", web::get().to(list_countries))
        .route("/cities", web::get().to(list_cities))
        .route("/cities/{id}", web::get().to(get_city))
        .route("/cities/{id}/suggestions", web::get().to(city_suggestions))
        .route(
            "/cities/{id}/suggestions/refresh",
            web::post().to(refresh_city_suggestions),
        );
}
