// Prompt constants for insight generation. Each template ends with the user query;
// replace `{query}` before sending. Subsection names must match the labels in
// `analysis.rs` so the formatter can find them in the reply.

use crate::insights::analysis::AnalysisType;

/// Shared preamble for every analysis type.
pub const BASE_PROMPT: &str = "You are an expert Business Intelligence AI Assistant specializing in strategic decision-making. \
    Your task is to analyze the following business query and provide comprehensive, actionable insights.";

pub const GENERAL_PROMPT_TEMPLATE: &str = "Provide a structured response including:
1. 📊 Business Insights
2. 🔑 Key Strategic Points
3. ✅ Actionable Recommendations
4. 📈 Implementation Timeline
5. 📊 Expected Outcomes

Query: {query}";

pub const COMPETITIVE_PROMPT_TEMPLATE: &str = "Focus on competitive analysis by providing:
1. 📊 Market Position Analysis
2. 🔍 Competitor Strengths and Weaknesses
3. 💡 Strategic Differentiators
4. 🎯 Market Opportunities
5. ⚠️ Potential Threats

Query: {query}";

pub const TREND_PROMPT_TEMPLATE: &str = "Focus on trend analysis by providing:
1. 📈 Current Market Trends
2. 🔮 Future Predictions
3. 🎯 Growth Opportunities
4. ⚠️ Risk Factors
5. 💡 Proactive Measures

Query: {query}";

/// Full prompt for a query: preamble, per-type subsection list, then the raw query.
pub fn build_prompt(query: &str, analysis_type: AnalysisType) -> String {
    let template = match analysis_type {
        AnalysisType::General => GENERAL_PROMPT_TEMPLATE,
        AnalysisType::Competitive => COMPETITIVE_PROMPT_TEMPLATE,
        AnalysisType::Trend => TREND_PROMPT_TEMPLATE,
    };
    format!("{BASE_PROMPT}\n\n{}", template.replace("{query}", query))
}
