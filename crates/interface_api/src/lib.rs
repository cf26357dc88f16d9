//! HTTP API Layer
//!
//! REST surface of the claims intake service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claim submission, policy lookup, health
//! - **Middleware**: request ids, tracing, request logging
//! - **DTOs**: multipart form parsing and response bodies
//! - **Error Handling**: `ApiError` maps pipeline failures to status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(orchestrator, policies);
//! let app = create_router(state, config.server.max_upload_bytes);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_claims::{ClaimOrchestrator, PolicyValidator};

use crate::handlers::{claims, health, policy};
use crate::middleware::{request_logging_middleware, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: ClaimOrchestrator,
    pub policies: Arc<dyn PolicyValidator>,
    /// Serialises claim handling so one submission completes before the next
    pub pipeline_lock: Arc<Mutex<()>>,
    /// Adapters consulted by the readiness check
    pub readiness: Vec<Arc<dyn HealthCheckable>>,
}

impl AppState {
    pub fn new(orchestrator: ClaimOrchestrator, policies: Arc<dyn PolicyValidator>) -> Self {
        Self {
            orchestrator,
            policies,
            pipeline_lock: Arc::new(Mutex::new(())),
            readiness: Vec::new(),
        }
    }

    /// Registers an adapter with the readiness check
    pub fn with_readiness_check(mut self, adapter: Arc<dyn HealthCheckable>) -> Self {
        self.readiness.push(adapter);
        self
    }
}

/// Creates the main API router
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    let policy_routes = Router::new().route("/validate", post(policy::validate_policy));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/policies", policy_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
