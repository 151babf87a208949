//! Analysis pipeline
//!
//! One run per inbound message:
//! - Fetch the named spreadsheet (fresh every time, never cached)
//! - Compose the system/user prompt from it
//! - Ask the completion provider for an answer

mod error;

pub use error::{MessageParseError, PipelineError};

use std::str::FromStr;
use std::sync::Arc;

use crate::llm::{CompletionProvider, CompletionRequest, GenerationConfig};
use crate::models::AnalysisRequest;
use crate::prompt::PromptComposer;
use crate::sheets::SpreadsheetSource;

/// What to do with a request that names no spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSheetPolicy {
    /// Send nothing back
    #[default]
    Ignore,
    /// Answer the question with an empty data context
    Answer,
}

impl FromStr for MissingSheetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(MissingSheetPolicy::Ignore),
            "answer" => Ok(MissingSheetPolicy::Answer),
            other => Err(format!("unknown missing-sheet policy '{}'", other)),
        }
    }
}

/// Spreadsheet reader, prompt composer and completion client wired together
///
/// Built once at startup and shared read-only by every session.
pub struct AnalysisPipeline {
    source: Arc<dyn SpreadsheetSource>,
    provider: Arc<dyn CompletionProvider>,
    composer: PromptComposer,
    generation: GenerationConfig,
    missing_sheet: MissingSheetPolicy,
}

impl AnalysisPipeline {
    pub fn new(
        source: Arc<dyn SpreadsheetSource>,
        provider: Arc<dyn CompletionProvider>,
        composer: PromptComposer,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            source,
            provider,
            composer,
            generation,
            missing_sheet: MissingSheetPolicy::default(),
        }
    }

    pub fn with_missing_sheet_policy(mut self, policy: MissingSheetPolicy) -> Self {
        self.missing_sheet = policy;
        self
    }

    /// Run the pipeline for one request
    ///
    /// Returns `Ok(None)` when the request names no spreadsheet and the
    /// policy is [`MissingSheetPolicy::Ignore`].
    pub async fn run(&self, request: &AnalysisRequest) -> Result<Option<String>, PipelineError> {
        let prompt = match (request.spreadsheet_id(), self.missing_sheet) {
            (Some(spreadsheet_id), _) => {
                let document = self.source.fetch(spreadsheet_id).await?;
                tracing::debug!(
                    spreadsheet_id,
                    sheets = document.sheets.len(),
                    "composing prompt"
                );
                self.composer.compose(&document, &request.content)
            }
            (None, MissingSheetPolicy::Answer) => {
                self.composer.compose_without_data(&request.content)
            }
            (None, MissingSheetPolicy::Ignore) => return Ok(None),
        };

        let completion =
            CompletionRequest::new(prompt.system, prompt.user, self.generation.clone());
        let answer = self.provider.complete(completion).await?;

        Ok(Some(answer))
    }
}
