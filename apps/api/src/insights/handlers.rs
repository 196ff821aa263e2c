//! Axum route handlers for the Insights API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::insights::analysis::AnalysisType;
use crate::insights::formatter::StructuredResponse;
use crate::insights::scoring::{consistency_score, relevance_score};
use crate::models::engagement::EngagementRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateInsightsRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub analysis_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateInsightsResponse {
    pub status: &'static str,
    pub query: String,
    pub analysis_type: AnalysisType,
    pub insights: StructuredResponse,
    #[serde(rename = "BRS")]
    pub brs: f64,
    #[serde(rename = "RCS")]
    pub rcs: u32,
}

#[derive(Debug, Serialize)]
pub struct AnalysisTypeInfo {
    pub id: AnalysisType,
    pub name: &'static str,
    pub description: &'static str,
    pub example_queries: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct AnalysisTypesResponse {
    pub analysis_types: Vec<AnalysisTypeInfo>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-insights
///
/// Validates the query, generates structured insights, scores them and appends
/// an engagement record. Log failures never fail the request.
pub async fn handle_generate_insights(
    State(state): State<AppState>,
    payload: Result<Json<GenerateInsightsRequest>, JsonRejection>,
) -> Result<Json<GenerateInsightsResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected request body: {rejection}");
        AppError::Validation("No JSON data provided".to_string())
    })?;

    let query = request.query.as_deref().unwrap_or("").trim().to_string();
    if query.is_empty() {
        return Err(AppError::Validation("No query provided".to_string()));
    }

    let analysis_type = match request.analysis_type.as_deref() {
        None => AnalysisType::default(),
        Some(raw) => raw
            .parse::<AnalysisType>()
            .map_err(|_| AppError::Validation("Invalid analysis type".to_string()))?,
    };

    let insights = state.orchestrator.generate(&query, analysis_type).await?;

    let brs = relevance_score(&query, &insights);
    let rcs = consistency_score(&insights, analysis_type);

    let record = EngagementRecord::new(query.clone(), insights.clone(), brs, rcs, analysis_type);
    if let Err(e) = state.engagement_log.append(&record).await {
        warn!("Failed to record engagement {}: {e:#}", record.id);
    }

    Ok(Json(GenerateInsightsResponse {
        status: "success",
        query,
        analysis_type,
        insights,
        brs,
        rcs,
    }))
}

/// GET /analysis-types
///
/// Static catalog of supported analysis types.
pub async fn handle_analysis_types() -> Json<AnalysisTypesResponse> {
    let analysis_types = AnalysisType::ALL
        .into_iter()
        .map(|t| AnalysisTypeInfo {
            id: t,
            name: t.display_name(),
            description: t.description(),
            example_queries: t.example_queries(),
        })
        .collect();

    Json(AnalysisTypesResponse { analysis_types })
}
