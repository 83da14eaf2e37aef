//! Routers de la API

pub mod auth_routes;
pub mod company_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router(state: AppState) -> Router<AppState> {
    // Rate limiting solo sobre los endpoints sensibles de autenticación
    let rate_limit = RateLimitState::new(&state.config);
    let auth_router = auth_routes::create_auth_router()
        .route_layer(middleware::from_fn_with_state(rate_limit, rate_limit_middleware));

    Router::new()
        .route("/api/health", get(health))
        .nest("/api/auth", auth_router)
        .nest("/api/company", company_routes::create_company_router(state))
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }
    }))
}
