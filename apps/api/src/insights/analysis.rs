//! Analysis types and the section table each one expects from the model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Query category. Selects the prompt template and the expected sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    General,
    Competitive,
    Trend,
}

/// Whether a section holds a freeform paragraph or a bullet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    Text,
    Items,
}

/// One expected section: the response key, the header the model writes, and its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub shape: SectionShape,
}

const fn text(key: &'static str, label: &'static str) -> SectionSpec {
    SectionSpec {
        key,
        label,
        shape: SectionShape::Text,
    }
}

const fn items(key: &'static str, label: &'static str) -> SectionSpec {
    SectionSpec {
        key,
        label,
        shape: SectionShape::Items,
    }
}

static GENERAL_SECTIONS: [SectionSpec; 5] = [
    text("summary", "Business Insights"),
    items("key_points", "Key Strategic Points"),
    items("recommendations", "Actionable Recommendations"),
    items("timeline", "Implementation Timeline"),
    items("outcomes", "Expected Outcomes"),
];

static COMPETITIVE_SECTIONS: [SectionSpec; 5] = [
    text("market_position", "Market Position Analysis"),
    items("competitor_analysis", "Competitor Strengths and Weaknesses"),
    items("differentiators", "Strategic Differentiators"),
    items("opportunities", "Market Opportunities"),
    items("threats", "Potential Threats"),
];

static TREND_SECTIONS: [SectionSpec; 5] = [
    items("current_trends", "Current Market Trends"),
    items("predictions", "Future Predictions"),
    items("opportunities", "Growth Opportunities"),
    items("risks", "Risk Factors"),
    items("measures", "Proactive Measures"),
];

#[derive(Debug, Error)]
#[error("Invalid analysis type: {0}")]
pub struct InvalidAnalysisType(pub String);

impl AnalysisType {
    /// Catalog order used by `GET /analysis-types`.
    pub const ALL: [AnalysisType; 3] = [
        AnalysisType::Competitive,
        AnalysisType::Trend,
        AnalysisType::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisType::General => "general",
            AnalysisType::Competitive => "competitive",
            AnalysisType::Trend => "trend",
        }
    }

    /// Ordered sections expected for this type.
    pub fn sections(self) -> &'static [SectionSpec] {
        match self {
            AnalysisType::General => &GENERAL_SECTIONS,
            AnalysisType::Competitive => &COMPETITIVE_SECTIONS,
            AnalysisType::Trend => &TREND_SECTIONS,
        }
    }

    /// The two leading sections that feed the relevance score.
    pub fn primary_sections(self) -> &'static [SectionSpec] {
        &self.sections()[..2]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AnalysisType::General => "General Business Analysis",
            AnalysisType::Competitive => "Competitive Analysis",
            AnalysisType::Trend => "Trend Analysis",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AnalysisType::General => "Provides comprehensive business insights and recommendations",
            AnalysisType::Competitive => {
                "Analyzes market position, competitors, and strategic differentiators"
            }
            AnalysisType::Trend => {
                "Analyzes current trends, future predictions, and growth opportunities"
            }
        }
    }

    pub fn example_queries(self) -> &'static [&'static str] {
        match self {
            AnalysisType::General => &[
                "What are the key growth opportunities for our business?",
                "How can we improve our operational efficiency?",
                "What strategic initiatives should we prioritize?",
            ],
            AnalysisType::Competitive => &[
                "Analyze our competitive position in the market",
                "What are our main competitors' strengths and weaknesses?",
                "How can we differentiate ourselves from competitors?",
            ],
            AnalysisType::Trend => &[
                "What are the emerging trends in our industry?",
                "How will market conditions evolve in the next year?",
                "What technological trends should we prepare for?",
            ],
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = InvalidAnalysisType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(AnalysisType::General),
            "competitive" => Ok(AnalysisType::Competitive),
            "trend" => Ok(AnalysisType::Trend),
            other => Err(InvalidAnalysisType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_declares_five_sections() {
        for analysis_type in AnalysisType::ALL {
            assert_eq!(analysis_type.sections().len(), 5, "{analysis_type}");
        }
    }

    #[test]
    fn test_scalar_section_only_leads_general_and_competitive() {
        assert_eq!(AnalysisType::General.sections()[0].shape, SectionShape::Text);
        assert_eq!(
            AnalysisType::Competitive.sections()[0].shape,
            SectionShape::Text
        );
        assert!(AnalysisType::Trend
            .sections()
            .iter()
            .all(|s| s.shape == SectionShape::Items));
        for analysis_type in AnalysisType::ALL {
            assert!(analysis_type.sections()[1..]
                .iter()
                .all(|s| s.shape == SectionShape::Items));
        }
    }

    #[test]
    fn test_primary_sections_are_first_two() {
        let keys: Vec<_> = AnalysisType::Trend
            .primary_sections()
            .iter()
            .map(|s| s.key)
            .collect();
        assert_eq!(keys, vec!["current_trends", "predictions"]);
    }

    #[test]
    fn test_from_str_accepts_known_types() {
        assert_eq!("general".parse::<AnalysisType>().unwrap(), AnalysisType::General);
        assert_eq!(
            "competitive".parse::<AnalysisType>().unwrap(),
            AnalysisType::Competitive
        );
        assert_eq!("trend".parse::<AnalysisType>().unwrap(), AnalysisType::Trend);
    }

    #[test]
    fn test_from_str_rejects_unknown_and_wrong_case() {
        assert!("forecast".parse::<AnalysisType>().is_err());
        assert!("General".parse::<AnalysisType>().is_err());
        assert!("".parse::<AnalysisType>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&AnalysisType::Competitive).unwrap();
        assert_eq!(json, r#""competitive""#);
        let parsed: AnalysisType = serde_json::from_str(r#""trend""#).unwrap();
        assert_eq!(parsed, AnalysisType::Trend);
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(AnalysisType::default(), AnalysisType::General);
    }
}
