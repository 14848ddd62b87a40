use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenVerifier;
use crate::database::DrinkStore;
use crate::handlers::drinks;
use crate::middleware::authorize;

/// Shared application state. The store and verifier are constructed once
/// at startup and cloned into handlers by the router; there is no
/// process-global database handle.
#[derive(Clone)]
pub struct AppState {
    pub store: DrinkStore,
    pub verifier: Arc<TokenVerifier>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Drinks resource, guarded per route
        .merge(drink_routes(&state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The drinks routes. Protected methods each compose the authorization
/// guard with the permission that route requires; GET /drinks stays
/// public.
fn drink_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/drinks", get(drinks::list))
        .route(
            "/drinks",
            post(drinks::create).route_layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, request: Request, next: Next| {
                    authorize(state, "post:drinks", request, next)
                },
            )),
        )
        .route(
            "/drinks-detail",
            get(drinks::list_detail).route_layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, request: Request, next: Next| {
                    authorize(state, "get:drinks-detail", request, next)
                },
            )),
        )
        .route(
            "/drinks/:id",
            patch(drinks::update).route_layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, request: Request, next: Next| {
                    authorize(state, "patch:drinks", request, next)
                },
            )),
        )
        .route(
            "/drinks/:id",
            delete(drinks::delete).route_layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, request: Request, next: Next| {
                    authorize(state, "delete:drinks", request, next)
                },
            )),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Drinks API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Role-scoped drinks menu API built with Rust (Axum)",
            "endpoints": {
                "list": "GET /drinks (public)",
                "detail": "GET /drinks-detail (requires get:drinks-detail)",
                "create": "POST /drinks (requires post:drinks)",
                "update": "PATCH /drinks/:id (requires patch:drinks)",
                "delete": "DELETE /drinks/:id (requires delete:drinks)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
