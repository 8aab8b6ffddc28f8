//! # Vet Clinic Backend
//!
//! Record store and business rules for a veterinary clinic's admin tool:
//! owners, their pets, and the pets' appointments.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    IO Layer     │  REST handlers, DTO mappers (io::rest)
//! ├─────────────────┤
//! │  Domain Layer   │  Services, validation, models (domain)
//! ├─────────────────┤
//! │  Storage Layer  │  Storage traits, SQLite repositories (storage)
//! └─────────────────┘
//! ```
//!
//! The one load-bearing rule is referential integrity on delete: an owner
//! with pets, or a pet with appointments, cannot be removed. Deletes never
//! cascade.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{CliArgs, ServerConfig};
pub use io::rest::AppState;

use storage::DbConnection;

/// Open the database and wire the services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Opening database {}", config.database_url);

    let db = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    Ok(AppState::new(db))
}

/// The full application router: API under `/api`, CORS and request tracing
pub fn create_router(state: AppState, cors_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", io::rest::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let state = initialize_backend(&config).await?;
    let app = create_router(state, config.cors_origins.clone());

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // never resolve, so the server keeps running
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use shared::{ErrorKind, ErrorResponse};
    use tower::ServiceExt;

    async fn setup_test_router() -> Router {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        create_router(AppState::new(db), vec![HeaderValue::from_static("http://localhost:5173")])
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_owner_lifecycle_over_http() {
        let app = setup_test_router().await;

        // the web client sends the misspelled field
        let (status, body) = send(
            &app,
            "POST",
            "/api/owners",
            Some(json!({"firtsName": "Juan", "lastName": "Pérez", "phone": "999888777", "email": "juan@mail.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let owner: shared::Owner = serde_json::from_slice(&body).unwrap();
        assert_eq!(owner.full_name, "Juan Pérez");
        assert_eq!(owner.pet_count, 0);

        let (status, body) = send(
            &app,
            "POST",
            "/api/pets",
            Some(json!({"name": "Max", "species": "Dog", "breed": "Labrador", "birthDate": "2020-01-01", "ownerId": owner.id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let pet: shared::Pet = serde_json::from_slice(&body).unwrap();
        assert_eq!(pet.owner_id, owner.id);
        assert_eq!(pet.owner_name, "Juan Pérez");

        let (status, body) = send(&app, "DELETE", &format!("/api/owners/{}", owner.id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.kind, ErrorKind::Conflict);

        let (status, _) = send(&app, "DELETE", &format!("/api/pets/{}", pet.id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &format!("/api/owners/{}", owner.id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/api/owners/{}", owner.id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_appointment_routes() {
        let app = setup_test_router().await;
        let (_, body) = send(
            &app,
            "POST",
            "/api/owners",
            Some(json!({"firstName": "Ana", "lastName": "Gómez", "phone": "123", "email": "ana@mail.com"})),
        )
        .await;
        let owner: shared::Owner = serde_json::from_slice(&body).unwrap();
        let (_, body) = send(
            &app,
            "POST",
            "/api/pets",
            Some(json!({"name": "Luna", "species": "Gato", "breed": "Siamés", "birthDate": "2022-05-10", "ownerId": owner.id})),
        )
        .await;
        let pet: shared::Pet = serde_json::from_slice(&body).unwrap();
        assert_eq!(pet.species, "Cat");

        let (status, body) = send(
            &app,
            "POST",
            "/api/appointments",
            Some(json!({"appointmentDate": "2031-03-02T10:30", "reason": "Vacunación", "petId": pet.id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "Scheduled");
        assert_eq!(value["canBeCanceled"], true);
        assert_eq!(value["appointmentDate"], "2031-03-02T10:30:00");
        let id = value["id"].as_i64().unwrap();

        let (status, body) = send(&app, "GET", &format!("/api/appointments/pet/{}", pet.id), None).await;
        assert_eq!(status, StatusCode::OK);
        let listed: Vec<shared::Appointment> = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed.len(), 1);

        let (status, body) = send(&app, "PATCH", &format!("/api/appointments/{}/cancel", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let cancelled: shared::Appointment = serde_json::from_slice(&body).unwrap();
        assert!(!cancelled.can_be_cancelled);

        let (status, _) = send(&app, "PATCH", &format!("/api/appointments/{}/cancel", id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, "GET", "/api/appointments/pet/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_body_gets_error_response() {
        let app = setup_test_router().await;

        let (status, body) = send(&app, "POST", "/api/owners", Some(json!({"firstName": 12}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.kind, ErrorKind::Validation);
        assert_eq!(error.details.len(), 1);
    }

    #[tokio::test]
    async fn test_non_numeric_id_gets_error_response() {
        let app = setup_test_router().await;

        for uri in ["/api/owners/abc", "/api/pets/owner/xyz", "/api/appointments/1.5"] {
            let (status, body) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
            assert_eq!(error.kind, ErrorKind::Validation);
            assert_eq!(error.details.len(), 1);
        }

        let (status, body) = send(&app, "PATCH", "/api/appointments/seven/cancel", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_validation_details_over_http() {
        let app = setup_test_router().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/owners",
            Some(json!({"firstName": "", "lastName": "", "phone": "1", "email": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.details.len(), 3);
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = setup_test_router().await;

        let (status, body) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let health: shared::HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() {
        let app = setup_test_router().await;
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/owners")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }
}
