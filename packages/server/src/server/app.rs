//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::common::AuthorizationGate;
use crate::kernel::ServerDeps;
use crate::server::graphql::{create_schema, Schema};
use crate::server::routes::{
    graphql_batch_handler, graphql_handler, graphql_playground, health_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub schema: Arc<Schema>,
    pub gate: AuthorizationGate,
    pub deps: Arc<ServerDeps>,
    /// Parent of every request's cancellation token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(deps: ServerDeps, shutdown: CancellationToken) -> Self {
        let gate = deps.authorization_gate();
        Self::with_gate(deps, gate, shutdown)
    }

    /// State with a caller-supplied gate (tests swap in mock collaborators)
    pub fn with_gate(deps: ServerDeps, gate: AuthorizationGate, shutdown: CancellationToken) -> Self {
        Self {
            db_pool: deps.db_pool.clone(),
            schema: Arc::new(create_schema()),
            gate,
            deps: Arc::new(deps),
            shutdown,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origins(allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/graphql", post(graphql_handler).get(graphql_playground))
        .route("/graphql/batch", post(graphql_batch_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Any origin when none are configured (development)
fn cors_origins(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.is_empty() {
        return AllowOrigin::from(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
