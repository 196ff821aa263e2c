//! Offline oracle for tests and `INSIGHTS_ORACLE=stub`.

use async_trait::async_trait;

use super::{CompletionOracle, LlmError, DEFAULT_MODEL_PREFERENCE};

/// What the stub answers with.
#[derive(Debug, Clone)]
#[cfg_attr(not(test), allow(dead_code))]
pub enum StubReply {
    /// Echoes each numbered subsection the prompt asks for as a header with one bullet.
    EchoSections,
    /// Always returns this text.
    Fixed(String),
    /// Fails every completion with an API error carrying this message.
    Fail(String),
}

/// Deterministic `CompletionOracle` that never touches the network.
#[derive(Debug, Clone)]
pub struct StubOracle {
    models: Vec<String>,
    listing_failure: Option<String>,
    reply: StubReply,
}

impl StubOracle {
    /// Advertises the default Gemini preference list and echoes requested sections.
    pub fn new() -> Self {
        Self::with_reply(StubReply::EchoSections)
    }

    pub fn with_reply(reply: StubReply) -> Self {
        Self {
            models: DEFAULT_MODEL_PREFERENCE
                .iter()
                .map(|m| format!("models/{m}"))
                .collect(),
            listing_failure: None,
            reply,
        }
    }

    #[cfg(test)]
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    /// Makes `list_models` fail with an API error carrying `message`.
    #[cfg(test)]
    pub fn with_listing_failure(mut self, message: &str) -> Self {
        self.listing_failure = Some(message.to_string());
        self
    }
}

impl Default for StubOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionOracle for StubOracle {
    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        match &self.listing_failure {
            Some(message) => Err(LlmError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(self.models.clone()),
        }
    }

    async fn complete(&self, _model: &str, prompt: &str) -> Result<String, LlmError> {
        match &self.reply {
            StubReply::EchoSections => Ok(echo_sections(prompt)),
            StubReply::Fixed(text) => Ok(text.clone()),
            StubReply::Fail(message) => Err(LlmError::Api {
                status: 503,
                message: message.clone(),
            }),
        }
    }
}

/// Turns every `N. <title>` line of the prompt into a `<title>:` header with a bullet.
fn echo_sections(prompt: &str) -> String {
    let query = prompt
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix("Query: "))
        .unwrap_or("the query")
        .trim();

    let mut reply = String::new();
    for line in prompt.lines() {
        let Some((number, title)) = line.split_once(". ") else {
            continue;
        };
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        reply.push_str(&format!("{title}:\n• {query}\n\n"));
    }
    reply
}
