//! API service routes

use axum::{
    Json, Router,
    http::{
        HeaderName, HeaderValue, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        request::Parts,
    },
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod todos;


/// Create the router for the API service
///
/// Registration and login are public. Every `/api/todos` route sits behind
/// the bearer-token middleware.
pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let protected_routes = Router::new()
        .route("/api/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/api/todos/:id",
            put(todos::update_todo).delete(todos::delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .merge(protected_routes)
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the single configured frontend origin
///
/// Requests from any other origin get no `Access-Control-Allow-Origin` header.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    let allowed_headers: [HeaderName; 4] = [ORIGIN, CONTENT_TYPE, ACCEPT, AUTHORIZATION];
    let allow_origin =
        AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| *origin == allowed_origin);

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(allowed_headers)
        .allow_credentials(true)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "todo-api"
    }))
}
