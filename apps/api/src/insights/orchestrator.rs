//! Insight generation pipeline: prompt → model selection → oracle call → formatting.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::insights::analysis::AnalysisType;
use crate::insights::formatter::{format_response, StructuredResponse};
use crate::insights::prompts::build_prompt;
use crate::llm_client::{select_model, CompletionOracle};

/// Terminal failures of a single generation request. Never retried.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("No valid Gemini model found! Available models: {}", .available.join(", "))]
    NoModelAvailable { available: Vec<String> },

    #[error("Error generating response: {0}")]
    GenerationFailed(String),
}

pub struct InsightOrchestrator {
    oracle: Arc<dyn CompletionOracle>,
    model_preference: Vec<String>,
}

impl InsightOrchestrator {
    pub fn new(oracle: Arc<dyn CompletionOracle>, model_preference: Vec<String>) -> Self {
        Self {
            oracle,
            model_preference,
        }
    }

    pub async fn generate(
        &self,
        query: &str,
        analysis_type: AnalysisType,
    ) -> Result<StructuredResponse, InsightError> {
        info!("Generating {analysis_type} insights for query: {query}");
        let prompt = build_prompt(query, analysis_type);

        let available = self.oracle.list_models().await.map_err(|e| {
            error!("Failed to list available models: {e}");
            InsightError::GenerationFailed(format!("Failed to list available models: {e}"))
        })?;
        debug!("Available models: {available:?}");

        let model = select_model(&available, &self.model_preference)
            .ok_or_else(|| InsightError::NoModelAvailable {
                available: available.clone(),
            })?;
        info!("Selected model: {model}");

        let text = self.oracle.complete(&model, &prompt).await.map_err(|e| {
            error!("Failed to generate content with {model}: {e}");
            InsightError::GenerationFailed(format!("Failed to generate content: {e}"))
        })?;

        if text.trim().is_empty() {
            return Err(InsightError::GenerationFailed(
                "No response generated from the model".to_string(),
            ));
        }

        let response = format_response(&text, analysis_type);
        debug!(
            "Formatted sections: {}",
            response.keys().collect::<Vec<_>>().join(", ")
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::formatter::SectionValue;
    use crate::llm_client::stub::{StubOracle, StubReply};
    use crate::llm_client::DEFAULT_MODEL_PREFERENCE;

    fn orchestrator(oracle: StubOracle) -> InsightOrchestrator {
        InsightOrchestrator::new(
            Arc::new(oracle),
            DEFAULT_MODEL_PREFERENCE.iter().map(|m| m.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_generate_formats_oracle_reply() {
        let reply = "📈 Current Market Trends:\n• AI adoption rising\n\n🔮 Future Predictions:\n- Automation grows\n";
        let orch = orchestrator(StubOracle::with_reply(StubReply::Fixed(reply.to_string())));

        let response = orch.generate("tech trends", AnalysisType::Trend).await.unwrap();
        assert_eq!(response.analysis_type(), AnalysisType::Trend);
        assert_eq!(
            response.get("current_trends"),
            Some(&SectionValue::Items(vec!["AI adoption rising".to_string()]))
        );
        assert_eq!(response.get("risks"), Some(&SectionValue::Items(vec![])));
    }

    #[tokio::test]
    async fn test_generate_with_echo_fills_every_section() {
        for analysis_type in AnalysisType::ALL {
            let response = orchestrator(StubOracle::new())
                .generate("retail expansion", analysis_type)
                .await
                .unwrap();
            for section in analysis_type.sections() {
                assert!(response.is_filled(section.key), "{analysis_type}/{}", section.key);
            }
        }
    }

    #[tokio::test]
    async fn test_no_matching_model_lists_available() {
        let oracle = StubOracle::new().with_models(vec!["models/gemini-1.0-pro".to_string()]);
        let err = orchestrator(oracle)
            .generate("q", AnalysisType::General)
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::NoModelAvailable { .. }));
        assert!(err.to_string().contains("models/gemini-1.0-pro"));
    }

    #[tokio::test]
    async fn test_model_listing_failure_is_generation_failed() {
        let oracle = StubOracle::new().with_listing_failure("listing down");
        let err = orchestrator(oracle)
            .generate("q", AnalysisType::Trend)
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::GenerationFailed(_)));
        assert!(err
            .to_string()
            .contains("Failed to list available models: API error (status 500): listing down"));
    }

    #[tokio::test]
    async fn test_oracle_failure_is_generation_failed() {
        let oracle = StubOracle::with_reply(StubReply::Fail("quota exceeded".to_string()));
        let err = orchestrator(oracle)
            .generate("q", AnalysisType::General)
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::GenerationFailed(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_blank_reply_is_generation_failed() {
        let oracle = StubOracle::with_reply(StubReply::Fixed("  \n ".to_string()));
        let err = orchestrator(oracle)
            .generate("q", AnalysisType::Competitive)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error generating response: No response generated from the model"
        );
    }
}
