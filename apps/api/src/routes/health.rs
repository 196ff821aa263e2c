use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::config::OracleMode;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and oracle mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let oracle = match state.config.oracle_mode {
        OracleMode::Gemini => "gemini",
        OracleMode::Stub => "stub",
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "insights-api",
        "oracle": oracle
    }))
}
