//! Comparison use case.
//!
//! Runs one request end to end: validate the user's input, build the prompt,
//! call the model once, extract and escape the answer. Every failure ends up
//! as a [`ComparisonOutcome`] variant; nothing is returned as an `Err` and
//! nothing is retried.

use crate::request::{ComparisonRequest, InputWarning};
use plancmp_core::PlanCompareError;
use plancmp_core::document::{DocumentId, DocumentRepository};
use plancmp_core::inference::{InferenceClient, InferenceError};
use plancmp_core::markdown::escape_markdown;
use plancmp_core::prompt::Prompt;
use plancmp_core::response::{AnalysisError, normalize};
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// A successfully extracted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Answer text as returned by the model
    pub answer: String,
    /// `answer` with markdown-significant characters escaped
    pub display: String,
    /// Full decoded response, for diagnostics
    pub raw: Value,
}

/// Result of one comparison request.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome {
    /// Input was rejected; no document was read and no request was sent.
    Rejected(InputWarning),
    /// A selected document could not be read.
    Failed(PlanCompareError),
    /// The request did not produce a response body.
    RequestFailed(InferenceError),
    /// A response arrived but the answer could not be extracted.
    AnalysisFailed { error: AnalysisError, raw: Value },
    Answered(Analysis),
}

impl ComparisonOutcome {
    pub fn is_answered(&self) -> bool {
        matches!(self, ComparisonOutcome::Answered(_))
    }

    /// The raw response, when one was received.
    pub fn raw_response(&self) -> Option<&Value> {
        match self {
            ComparisonOutcome::Answered(analysis) => Some(&analysis.raw),
            ComparisonOutcome::AnalysisFailed { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Coordinates document loading, prompt building and the inference call.
///
/// Failures are logged at `info`; callers are expected to show the outcome
/// to the user themselves.
pub struct ComparisonUseCase {
    documents: Arc<dyn DocumentRepository>,
    client: Arc<dyn InferenceClient>,
    max_selected: usize,
}

impl ComparisonUseCase {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        client: Arc<dyn InferenceClient>,
        max_selected: usize,
    ) -> Self {
        Self {
            documents,
            client,
            max_selected,
        }
    }

    /// Lists the plans a user can pick from.
    pub async fn list_plans(&self) -> plancmp_core::Result<Vec<DocumentId>> {
        self.documents.list().await
    }

    /// Builds the prompt that [`compare`](Self::compare) would send, without
    /// sending it.
    pub async fn preview_prompt(
        &self,
        plan_ids: &[DocumentId],
        question: &str,
    ) -> Result<Prompt, ComparisonOutcome> {
        let request = ComparisonRequest::new(plan_ids, question, self.max_selected)
            .map_err(ComparisonOutcome::Rejected)?;
        request
            .render_prompt(self.documents.as_ref())
            .await
            .map_err(ComparisonOutcome::Failed)
    }

    /// Validates the input, then runs one comparison.
    pub async fn compare(&self, plan_ids: &[DocumentId], question: &str) -> ComparisonOutcome {
        match ComparisonRequest::new(plan_ids, question, self.max_selected) {
            Ok(request) => self.execute(&request).await,
            Err(warning) => {
                tracing::info!(%warning, "Comparison rejected");
                ComparisonOutcome::Rejected(warning)
            }
        }
    }

    /// Runs one comparison for input that was already validated.
    pub async fn execute(&self, request: &ComparisonRequest) -> ComparisonOutcome {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "compare",
            %request_id,
            plans = request.selection().len(),
            model = %self.client.model()
        );
        self.execute_inner(request).instrument(span).await
    }

    async fn execute_inner(&self, request: &ComparisonRequest) -> ComparisonOutcome {
        let prompt = match request.render_prompt(self.documents.as_ref()).await {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::info!(error = %err, "Failed to build prompt");
                return ComparisonOutcome::Failed(err);
            }
        };

        let raw = match self.client.complete(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::info!(error = %err, "Inference request failed");
                return ComparisonOutcome::RequestFailed(err);
            }
        };

        match normalize(&raw) {
            Ok(answer) => {
                tracing::info!(answer_chars = answer.len(), "Comparison answered");
                let display = escape_markdown(&answer);
                ComparisonOutcome::Answered(Analysis {
                    answer,
                    display,
                    raw,
                })
            }
            Err(error) => {
                tracing::info!(%error, "Could not extract answer from response");
                ComparisonOutcome::AnalysisFailed { error, raw }
            }
        }
    }
}
