pub mod compare;
pub mod plans;
pub mod prompt;
pub mod questions;
pub mod shell;

use std::path::Path;

use anyhow::{Result, bail};
use clap::{ArgGroup, Args};
use plancmp_application::{ComparisonRequest, InputWarning};
use plancmp_core::document::{DOCUMENT_EXTENSION, DocumentId};
use plancmp_core::question::{PRESET_QUESTIONS, preset_question};

/// Plan selection and question shared by `compare` and `prompt`.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("question_source").required(true).args(["question", "preset"])))]
pub struct RequestArgs {
    /// Plan to include (file name, `.txt` optional); repeat for a second plan
    #[arg(long = "plan", value_name = "ID")]
    pub plans: Vec<String>,

    /// Free-text question about the plans
    #[arg(long, value_name = "TEXT")]
    pub question: Option<String>,

    /// Preset question by index (see `plancmp questions`)
    #[arg(long, value_name = "N")]
    pub preset: Option<usize>,
}

impl RequestArgs {
    pub fn plan_ids(&self) -> Result<Vec<DocumentId>> {
        self.plans.iter().map(|raw| parse_plan_id(raw)).collect()
    }

    pub fn question(&self) -> Result<String> {
        match (self.preset, &self.question) {
            (Some(index), _) => match preset_question(index) {
                Some(question) => Ok(question.to_string()),
                None => bail!(
                    "Unknown preset question {index}; choose 1-{}",
                    PRESET_QUESTIONS.len()
                ),
            },
            (None, Some(question)) => Ok(question.clone()),
            (None, None) => Ok(String::new()),
        }
    }
}

impl RequestArgs {
    /// Parses and validates the arguments without touching documents or
    /// credentials. The inner error is a warning for the user, the outer one
    /// a malformed argument.
    pub fn request(&self, max_selected: usize) -> Result<Result<ComparisonRequest, InputWarning>> {
        let plan_ids = self.plan_ids()?;
        let question = self.question()?;
        Ok(ComparisonRequest::new(&plan_ids, &question, max_selected))
    }
}

/// Accepts plan names with or without the `.txt` extension.
pub fn parse_plan_id(raw: &str) -> Result<DocumentId> {
    let raw = raw.trim();
    let id = if Path::new(raw).extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION) {
        DocumentId::parse(raw)?
    } else {
        DocumentId::parse(format!("{raw}.{DOCUMENT_EXTENSION}"))?
    };
    Ok(id)
}
