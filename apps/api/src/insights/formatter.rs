//! Turns a raw model reply into a `StructuredResponse` keyed by the analysis type's sections.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::insights::analysis::{AnalysisType, SectionShape};
use crate::insights::extractor::{extract_block, extract_items};

/// Value of a single section: a freeform paragraph or a list of bullet items.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionValue {
    Text(String),
    Items(Vec<String>),
}

impl SectionValue {
    /// False for an empty string or an empty list.
    pub fn is_filled(&self) -> bool {
        match self {
            SectionValue::Text(text) => !text.is_empty(),
            SectionValue::Items(items) => !items.is_empty(),
        }
    }

    /// Flattens the value to plain text, joining list items with spaces.
    pub fn joined(&self) -> String {
        match self {
            SectionValue::Text(text) => text.clone(),
            SectionValue::Items(items) => items.join(" "),
        }
    }
}

impl Serialize for SectionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SectionValue::Text(text) => serializer.serialize_str(text),
            SectionValue::Items(items) => items.serialize(serializer),
        }
    }
}

/// Parsed model reply. Holds every section key declared for its analysis type,
/// in declaration order. Serialises as a flat JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredResponse {
    analysis_type: AnalysisType,
    sections: Vec<(&'static str, SectionValue)>,
}

impl StructuredResponse {
    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }

    pub fn get(&self, key: &str) -> Option<&SectionValue> {
        self.sections
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|(k, _)| *k)
    }

    /// Text of the section, or an empty string if absent.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(SectionValue::joined).unwrap_or_default()
    }

    /// True when the key is present and non-empty.
    pub fn is_filled(&self, key: &str) -> bool {
        self.get(key).is_some_and(SectionValue::is_filled)
    }
}

impl Serialize for StructuredResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (key, value) in &self.sections {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Formats a raw reply for the given analysis type. Never fails: sections that
/// cannot be found come back empty.
pub fn format_response(raw_text: &str, analysis_type: AnalysisType) -> StructuredResponse {
    let specs = analysis_type.sections();
    let labels: Vec<&str> = specs.iter().map(|s| s.label).collect();
    let mut item_lists = extract_items(raw_text, &labels);

    let sections = specs
        .iter()
        .zip(item_lists.iter_mut())
        .map(|(section, items)| {
            let value = match section.shape {
                SectionShape::Text => {
                    SectionValue::Text(extract_block(raw_text, section.label).trim().to_string())
                }
                SectionShape::Items => {
                    let mut items = std::mem::take(items);
                    items.retain(|item| !item.is_empty());
                    SectionValue::Items(items)
                }
            };
            (section.key, value)
        })
        .collect();

    StructuredResponse {
        analysis_type,
        sections,
    }
}
