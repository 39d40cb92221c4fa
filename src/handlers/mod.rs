// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and mount every route under /api

pub mod activities;
pub mod auth;
pub mod destinations;
pub mod extractor;
pub mod geography;
pub mod health;
pub mod photos;
pub mod suggestions;
pub mod users;

pub use extractor::AuthenticatedUser;

use crate::errors::WishlistError;
use actix_web::web;

/// Extractor failures answer with the usual error body: bodies that miss the
/// schema are validation errors, unparsable query strings and path ids are
/// invalid input
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        WishlistError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        WishlistError::InvalidInput(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _| {
        WishlistError::InvalidInput(err.to_string()).into()
    }));
}

/// Register all API routes (mounted under /api by main)
pub fn configure(cfg: &mut web::ServiceConfig) {
    extractor_configs(cfg);
    health::config(cfg);
    auth::config(cfg);
    users::config(cfg);
    geography::config(cfg);
    destinations::config(cfg);
    photos::config(cfg);
    activities::config(cfg);
    suggestions::config(cfg);
}


#[cfg(test)]
mod tests {
    use super::test_support::test_state;
    use super::*;
    use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    macro_rules! api_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .service(web::scope("/api").configure(configure)),
            )
            .await
        };
    }

    /// Register a user through the API and return its `Authorization` header value
    macro_rules! register {
        ($app:expr, $email:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "email": $email,
                    "password": "long-enough-password",
                    "first_name": "Test",
                    "last_name": "Traveler"
                }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            format!("Bearer {}", body["access_token"].as_str().unwrap())
        }};
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let (state, _, _) = test_state().await;
        let app = api_app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_destination_flow_over_http() {
        let (state, store, _) = test_state().await;
        let world = store.seed_sample().await;
        let app = api_app!(state);
        let bearer = register!(app, "flow@example.com");

        // Unauthenticated access is refused
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/destinations").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let create = |city_id: String| {
            test::TestRequest::post()
                .uri("/api/destinations")
                .insert_header((AUTHORIZATION, bearer.clone()))
                .set_json(json!({ "city_id": city_id, "visited": true }))
                .to_request()
        };

        let resp = test::call_service(&app, create(world.tokyo.id.to_string())).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let destination: Value = test::read_body_json(resp).await;
        let destination_id = destination["id"].as_str().unwrap().to_string();

        let resp = test::call_service(&app, create(world.tokyo.id.to_string())).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "CONFLICT");

        let detail: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/destinations/{}", destination_id))
                .insert_header((AUTHORIZATION, bearer.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(detail["city"]["name"], "Tokyo");
        assert_eq!(detail["city"]["country"]["continent"]["name"], "Asia");
        assert_eq!(detail["photos"], json!([]));

        let stats: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/destinations/stats")
                .insert_header((AUTHORIZATION, bearer.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(stats["total_destinations"], 1);
        assert_eq!(stats["visited_count"], 1);
        assert_eq!(stats["country_stats"]["Japan"], 1);

        let suggestions: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/destinations/{}/suggestions", destination_id))
                .insert_header((AUTHORIZATION, bearer.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(suggestions.as_array().unwrap().len(), 2);
        assert_eq!(suggestions[1]["category"], "nightlife");

        let adopted = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!(
                    "/api/destinations/{}/suggestions/{}/adopt",
                    destination_id,
                    suggestions[0]["id"].as_str().unwrap()
                ))
                .insert_header((AUTHORIZATION, bearer.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(adopted.status(), StatusCode::CREATED);
        let activity: Value = test::read_body_json(adopted).await;
        assert_eq!(activity["name"], "Meiji Shrine");

        let toggled: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/activities/{}/toggle", activity["id"].as_str().unwrap()))
                .insert_header((AUTHORIZATION, bearer.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(toggled["completed"], true);

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/destinations/{}", destination_id))
                .insert_header((AUTHORIZATION, bearer.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_photo_upload_and_ownership_over_http() {
        let (state, store, files) = test_state().await;
        let world = store.seed_sample().await;
        let app = api_app!(state);
        let owner = register!(app, "owner@example.com");
        let intruder = register!(app, "intruder@example.com");

        let destination: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/destinations")
                .insert_header((AUTHORIZATION, owner.clone()))
                .set_json(json!({ "city_id": world.paris.id }))
                .to_request(),
        )
        .await;
        let destination_id = destination["id"].as_str().unwrap().to_string();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!(
                    "/api/destinations/{}/photos?filename=seine.png&caption=Evening",
                    destination_id
                ))
                .insert_header((AUTHORIZATION, owner.clone()))
                .insert_header((CONTENT_TYPE, "image/png"))
                .set_payload(&b"\x89PNG-bytes"[..])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let photo: Value = test::read_body_json(resp).await;
        assert_eq!(photo["caption"], "Evening");
        assert!(files.contains(photo["url"].as_str().unwrap()).await);
        let photo_id = photo["id"].as_str().unwrap().to_string();

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/photos/{}/file", photo_id))
                .insert_header((AUTHORIZATION, owner.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(test::read_body(resp).await, &b"\x89PNG-bytes"[..]);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/destinations/{}/photos", destination_id))
                .insert_header((AUTHORIZATION, owner.clone()))
                .insert_header((CONTENT_TYPE, "text/plain"))
                .set_payload("not an image")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Child reached by id: forbidden. Parent reached by id: not found.
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/photos/{}", photo_id))
                .insert_header((AUTHORIZATION, intruder.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/destinations/{}/photos", destination_id))
                .insert_header((AUTHORIZATION, intruder.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_invalid_bodies_use_error_shape() {
        let (state, _, _) = test_state().await;
        let app = api_app!(state);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "email": "not-an-email",
                    "password": "short",
                    "first_name": "",
                    "last_name": "X"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .insert_header((CONTENT_TYPE, "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_malformed_ids_are_invalid_input() {
        let (state, _, _) = test_state().await;
        let app = api_app!(state);
        let bearer = register!(app, "ids@example.com");

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/cities?country_id=not-a-uuid")
                .insert_header((AUTHORIZATION, bearer.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/destinations/not-a-uuid")
                .insert_header((AUTHORIZATION, bearer))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }
}
