//! Validated input for one comparison.

use plancmp_core::document::{DocumentId, DocumentRepository, PlanSelection, SelectionError};
use plancmp_core::prompt::{Prompt, PromptBuilder};
use std::fmt;

/// Why a request was refused before any document was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWarning {
    NoPlanSelected,
    TooManyPlans { selected: usize, max: usize },
    NoQuestion,
}

impl fmt::Display for InputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputWarning::NoPlanSelected => {
                write!(f, "Please select at least one healthcare plan.")
            }
            InputWarning::TooManyPlans { selected, max } => write!(
                f,
                "Please select at most {max} healthcare plans ({selected} selected)."
            ),
            InputWarning::NoQuestion => write!(f, "Please enter a question about the plans."),
        }
    }
}

impl From<SelectionError> for InputWarning {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::Empty => InputWarning::NoPlanSelected,
            SelectionError::TooMany { selected, max } => {
                InputWarning::TooManyPlans { selected, max }
            }
        }
    }
}

/// A plan selection and a non-blank question, checked but not yet loaded.
///
/// Building one touches neither the filesystem nor the network, so front
/// ends can reject bad input before resolving credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    selection: PlanSelection,
    question: String,
}

impl ComparisonRequest {
    /// Validates the selection first, then the question.
    pub fn new(
        plan_ids: &[DocumentId],
        question: &str,
        max_selected: usize,
    ) -> Result<Self, InputWarning> {
        let selection = PlanSelection::new(plan_ids.iter().cloned(), max_selected)?;
        if question.trim().is_empty() {
            return Err(InputWarning::NoQuestion);
        }
        Ok(Self {
            selection,
            question: question.to_string(),
        })
    }

    pub fn selection(&self) -> &PlanSelection {
        &self.selection
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Loads the selected documents and renders the prompt.
    pub async fn render_prompt<R>(&self, documents: &R) -> plancmp_core::Result<Prompt>
    where
        R: DocumentRepository + ?Sized,
    {
        PromptBuilder::new()
            .build(documents, &self.selection, Some(&self.question))
            .await
    }
}
