use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::insights::analysis::AnalysisType;
use crate::insights::formatter::StructuredResponse;

/// One answered query, as appended to the engagement log. Never updated.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementRecord {
    pub id: Uuid,
    pub query: String,
    pub response: StructuredResponse,
    #[serde(rename = "BRS")]
    pub brs: f64,
    #[serde(rename = "RCS")]
    pub rcs: u32,
    pub analysis_type: AnalysisType,
    pub timestamp: DateTime<Utc>,
}

impl EngagementRecord {
    pub fn new(
        query: String,
        response: StructuredResponse,
        brs: f64,
        rcs: u32,
        analysis_type: AnalysisType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            query,
            response,
            brs,
            rcs,
            analysis_type,
            timestamp: Utc::now(),
        }
    }
}
