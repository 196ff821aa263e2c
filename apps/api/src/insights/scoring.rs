//! Response quality heuristics.
//!
//! - Business Relevance Score (BRS): TF-IDF cosine similarity between the query and
//!   the response's primary sections, scaled to 0–100.
//! - Response Consistency Score (RCS): how many of the expected sections came back filled.
//!
//! The vectoriser mirrors scikit-learn's `TfidfVectorizer(stop_words="english")` defaults:
//! lowercased `\w\w+` tokens, raw term counts, smoothed idf `ln((1+n)/(1+df)) + 1`, L2 norm.

use std::collections::{BTreeMap, HashMap};

use crate::insights::analysis::AnalysisType;
use crate::insights::formatter::StructuredResponse;
use crate::insights::stop_words::is_stop_word;

/// RCS by number of missing sections.
const CONSISTENCY_TABLE: [(usize, u32); 6] = [(0, 100), (1, 80), (2, 60), (3, 40), (4, 20), (5, 0)];

/// Business Relevance Score in [0, 100], rounded to two decimals.
///
/// Returns 0 when either document is blank or no vocabulary survives stop-word removal.
pub fn relevance_score(query: &str, response: &StructuredResponse) -> f64 {
    let primary = primary_text(response);
    if query.trim().is_empty() || primary.trim().is_empty() {
        return 0.0;
    }

    match tfidf_cosine(query, &primary) {
        Some(similarity) => round2((similarity * 100.0).clamp(0.0, 100.0)),
        None => {
            tracing::debug!("No shared vocabulary for relevance scoring; BRS = 0");
            0.0
        }
    }
}

/// Response Consistency Score: 100 minus 20 per missing or empty required section.
pub fn consistency_score(response: &StructuredResponse, analysis_type: AnalysisType) -> u32 {
    let missing = analysis_type
        .sections()
        .iter()
        .filter(|section| !response.is_filled(section.key))
        .count();

    CONSISTENCY_TABLE
        .iter()
        .find(|(count, _)| *count == missing)
        .map(|(_, score)| *score)
        .unwrap_or(0)
}

/// Concatenates the two leading sections: `"{first} {second}"`.
fn primary_text(response: &StructuredResponse) -> String {
    let parts: Vec<String> = response
        .analysis_type()
        .primary_sections()
        .iter()
        .map(|section| response.text(section.key))
        .collect();
    parts.join(" ")
}

/// Cosine similarity of the two documents' TF-IDF vectors over a shared vocabulary.
/// `None` when the vocabulary is empty.
fn tfidf_cosine(a: &str, b: &str) -> Option<f64> {
    let docs = [term_counts(a), term_counts(b)];

    let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
    for counts in &docs {
        for term in counts.keys() {
            *doc_freq.entry(term.as_str()).or_insert(0) += 1;
        }
    }
    if doc_freq.is_empty() {
        return None;
    }

    let n = docs.len() as f64;
    let vectors: Vec<Vec<f64>> = docs
        .iter()
        .map(|counts| {
            let mut vector: Vec<f64> = doc_freq
                .iter()
                .map(|(term, df)| {
                    let tf = counts.get(*term).copied().unwrap_or(0) as f64;
                    let idf = ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0;
                    tf * idf
                })
                .collect();
            l2_normalize(&mut vector);
            vector
        })
        .collect();

    Some(cosine_similarity(&vectors[0], &vectors[1]))
}

fn term_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Lowercased runs of two or more word characters, stop words removed.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

fn l2_normalize(vector: &mut [f64]) {
    let magnitude = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if magnitude > 0.0 {
        for v in vector.iter_mut() {
            *v /= magnitude;
        }
    }
}

/// Returns 0.0 when either vector has zero magnitude.
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
