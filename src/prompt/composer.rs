//! System/user prompt assembly

use serde_json::Value;

use super::metrics::MetricsProjection;
use super::projection::{CellGrid, RowRecords, SheetProjection};
use crate::sheets::SpreadsheetDocument;

const GENERAL_PERSONA: &str = "You are an AI analyst specialized in analyzing spreadsheet data and providing insights.";

const GENERAL_DIRECTIVES: &[&str] = &[
    "Trends and patterns in the data",
    "Key metrics and their relationships",
    "Potential forecasts based on historical data",
    "Any anomalies or interesting findings",
];

const GENERAL_SECTIONS: &[&str] = &[
    "Summary of findings",
    "Detailed analysis",
    "Recommendations (if applicable)",
    "Data limitations or caveats",
];

const METRICS_PERSONA: &str = "You are a performance marketing analyst. You receive a daily time series with two ratio metrics and answer questions about it concisely.";

const METRICS_DIRECTIVES: &[&str] = &[
    "Trend detection: how each metric moves over the dates provided",
    "Comparative analysis: how the two metrics relate to each other",
    "Anomaly detection: days that deviate sharply from the surrounding values",
    "Recommendations: concrete next steps supported by the numbers",
];

/// Two-part prompt for a chat-completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Builds prompts from a persona, a projection and fixed directives
pub struct PromptComposer {
    persona: String,
    directives: Vec<String>,
    sections: Vec<String>,
    projection: Box<dyn SheetProjection>,
}

impl PromptComposer {
    pub fn new(persona: impl Into<String>, projection: Box<dyn SheetProjection>) -> Self {
        Self {
            persona: persona.into(),
            directives: Vec::new(),
            sections: Vec::new(),
            projection,
        }
    }

    /// Add an analysis directive; rendered as a numbered list
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Add a response section; rendered as a bullet list
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.sections.push(section.into());
        self
    }

    /// Analyst persona over every sheet, keyed by header
    pub fn general() -> Self {
        Self::analyst(Box::new(RowRecords))
    }

    /// Analyst persona over the raw cell grid of every sheet
    pub fn grid() -> Self {
        Self::analyst(Box::new(CellGrid))
    }

    fn analyst(projection: Box<dyn SheetProjection>) -> Self {
        let composer = Self::new(GENERAL_PERSONA, projection);
        let composer = GENERAL_DIRECTIVES
            .iter()
            .fold(composer, |c, directive| c.with_directive(*directive));
        GENERAL_SECTIONS
            .iter()
            .fold(composer, |c, section| c.with_section(*section))
    }

    /// Narrow persona over the projected metric series
    pub fn metrics(projection: MetricsProjection) -> Self {
        METRICS_DIRECTIVES
            .iter()
            .fold(Self::new(METRICS_PERSONA, Box::new(projection)), |c, directive| {
                c.with_directive(*directive)
            })
    }

    /// Embed the projected document and pass the question through verbatim
    pub fn compose(&self, document: &SpreadsheetDocument, question: &str) -> Prompt {
        self.render(&self.projection.project(document), question)
    }

    /// Same prompt with an empty data object, for questions without a spreadsheet
    pub fn compose_without_data(&self, question: &str) -> Prompt {
        self.render(&Value::Object(Default::default()), question)
    }

    fn render(&self, data: &Value, question: &str) -> Prompt {
        let data = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());

        let mut system = format!(
            "{}\nYou have access to the following spreadsheet data:\n{}\n\n\
             Please analyze this data and provide insights based on the user's question.",
            self.persona, data
        );

        if !self.directives.is_empty() {
            system.push_str("\nConsider:");
            for (i, directive) in self.directives.iter().enumerate() {
                system.push_str(&format!("\n{}. {}", i + 1, directive));
            }
        }

        if !self.sections.is_empty() {
            system.push_str("\n\nFormat your response in a clear, structured way with sections for:");
            for section in &self.sections {
                system.push_str(&format!("\n- {}", section));
            }
        }

        Prompt {
            system,
            user: question.to_string(),
        }
    }
}
