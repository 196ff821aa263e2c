use std::sync::Arc;

use crate::config::Config;
use crate::engagement_log::EngagementLog;
use crate::insights::orchestrator::InsightOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<InsightOrchestrator>,
    /// Single writer for the on-disk engagement log.
    pub engagement_log: Arc<EngagementLog>,
    pub config: Config,
}
