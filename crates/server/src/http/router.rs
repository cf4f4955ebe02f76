use super::handlers::{comments, form, page};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

fn cors_layer(allowed_origins: &str) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    if allowed_origins == "*" {
        return CorsLayer::new()
            .allow_methods(methods)
            .allow_origin(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
        CorsLayer::new()
            .allow_methods(methods)
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        tracing::info!("CORS enabled for origins: {:?}", origins);
        CorsLayer::new()
            .allow_methods(methods)
            .allow_origin(origins)
            .allow_headers(Any)
    }
}

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/api/form", get(form::get_form))
        .route("/api/form/fields", put(form::update_field))
        .route(
            "/api/form/image",
            post(form::upload_image)
                .delete(form::remove_image)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/api/form/edit/:id", post(form::begin_edit))
        .route("/api/form/submit", post(form::submit))
        .route("/api/comments", get(comments::list_comments))
        .route("/api/comments/:id", delete(comments::delete_comment))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
