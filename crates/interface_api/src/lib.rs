//! HTTP API Layer
//!
//! REST surface for the loan origination workflow, using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one handler per workflow step
//! - **DTOs**: request/response bodies, with amounts as integer cents
//! - **Error handling**: consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod service_view;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_application::OriginationService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OriginationService>,
}

/// Creates the main API router
pub fn create_router(service: Arc<OriginationService>) -> Router {
    let state = AppState { service };

    let application_routes = Router::new()
        .route("/", post(handlers::create_application))
        .route("/:id/identity", post(handlers::submit_identity))
        .route("/:id/ssn", post(handlers::submit_ssn))
        .route("/:id/income", post(handlers::submit_income))
        .route("/:id/confirmation", post(handlers::confirm))
        .route("/:id/exit", post(handlers::exit_application));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1/loan-applications", application_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
