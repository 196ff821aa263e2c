// Business insight generation.
// Implements: section table, reply extraction and formatting, quality scoring, orchestration.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod analysis;
pub mod extractor;
pub mod formatter;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod scoring;
pub mod stop_words;
