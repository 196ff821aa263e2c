pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::insights::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/generate-insights",
            post(handlers::handle_generate_insights),
        )
        .route("/analysis-types", get(handlers::handle_analysis_types))
        .fallback(not_found)
        .with_state(state)
}
