use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::speech::Speaker;
use crate::vision::Describer;

pub struct AppState {
    pub describer: Arc<dyn Describer>,
    pub speaker: Arc<dyn Speaker>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::index))
        .route("/describe-and-speak", post(handlers::describe_and_speak))
        .route("/api/health", get(handlers::health))
        // Phone camera uploads routinely exceed axum's 2 MB default
        .layer(DefaultBodyLimit::max(25 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
