//! Prompt construction.
//!
//! Layout of a rendered prompt for two plans and a question:
//!
//! ```text
//! #################################
//! PLAN: PlanA
//! PLANDETAILS: <sanitized content>
//! #################################
//!
//! PLAN: PlanB
//! PLANDETAILS: <sanitized content>
//! #################################
//!
//! #################################
//! COMPARE THE ABOVE HEALTHCARE PLANS AND ANSWER THIS QUESTION:
//! <sanitized question>
//! ```

use crate::document::{Document, DocumentRepository, PlanSelection};
use crate::error::Result;
use crate::sanitizer::sanitize;
use std::fmt;

pub const DELIMITER: &str = "#################################";
pub const COMPARISON_INSTRUCTION: &str =
    "COMPARE THE ABOVE HEALTHCARE PLANS AND ANSWER THIS QUESTION:";

/// The text payload sent to the model. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Wraps text that was rendered elsewhere.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders documents and a question into a [`Prompt`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Renders already-loaded documents. Document content is sanitized into
    /// the output; the documents themselves are left untouched.
    pub fn render(&self, documents: &[Document], question: Option<&str>) -> Prompt {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');

        for document in documents {
            out.push_str("PLAN: ");
            out.push_str(document.name());
            out.push('\n');
            out.push_str("PLANDETAILS: ");
            out.push_str(&sanitize(&document.content));
            out.push('\n');
            out.push_str(DELIMITER);
            out.push_str("\n\n");
        }

        if let Some(question) = question.filter(|q| !q.is_empty()) {
            out.push_str(DELIMITER);
            out.push('\n');
            out.push_str(COMPARISON_INSTRUCTION);
            out.push('\n');
            out.push_str(&sanitize(question));
        }

        Prompt(out)
    }

    /// Loads every selected document in order, then renders.
    ///
    /// Fails on the first document that cannot be read; no partial prompt is
    /// produced.
    pub async fn build<R>(
        &self,
        repository: &R,
        selection: &PlanSelection,
        question: Option<&str>,
    ) -> Result<Prompt>
    where
        R: DocumentRepository + ?Sized,
    {
        let mut documents = Vec::with_capacity(selection.len());
        for id in selection.ids() {
            let document = repository.load(id).await?;
            tracing::debug!(
                document = %id,
                bytes = document.content.len(),
                "Loaded plan document"
            );
            documents.push(document);
        }
        Ok(self.render(&documents, question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentId;
    use crate::error::PlanCompareError;
    use std::collections::HashMap;

    struct MemoryRepository {
        documents: HashMap<DocumentId, String>,
    }

    impl MemoryRepository {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                documents: entries
                    .iter()
                    .map(|(id, content)| (DocumentId::parse(*id).unwrap(), content.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl DocumentRepository for MemoryRepository {
        async fn list(&self) -> Result<Vec<DocumentId>> {
            let mut ids: Vec<_> = self.documents.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        }

        async fn load(&self, id: &DocumentId) -> Result<Document> {
            self.documents
                .get(id)
                .map(|content| Document::new(id.clone(), content.clone()))
                .ok_or_else(|| PlanCompareError::not_found("document", id.as_str()))
        }
    }

    fn selection(ids: &[&str]) -> PlanSelection {
        PlanSelection::new(ids.iter().map(|id| DocumentId::parse(*id).unwrap()), 2).unwrap()
    }

    #[tokio::test]
    async fn test_two_plans_with_question() {
        let repo = MemoryRepository::new(&[("PlanA.txt", "Cost: $100"), ("PlanB.txt", "Cost: $200")]);
        let prompt = PromptBuilder::new()
            .build(&repo, &selection(&["PlanA.txt", "PlanB.txt"]), Some("Which is cheaper?"))
            .await
            .unwrap();

        let expected = format!(
            "{d}\nPLAN: PlanA\nPLANDETAILS: Cost: $100\n{d}\n\n\
             PLAN: PlanB\nPLANDETAILS: Cost: $200\n{d}\n\n\
             {d}\n{i}\nWhich is cheaper?",
            d = DELIMITER,
            i = COMPARISON_INSTRUCTION
        );
        assert_eq!(prompt.as_str(), expected);
    }

    #[tokio::test]
    async fn test_blocks_follow_selection_order() {
        let repo = MemoryRepository::new(&[("A.txt", "alpha"), ("B.txt", "beta")]);
        let prompt = PromptBuilder::new()
            .build(&repo, &selection(&["B.txt", "A.txt"]), Some("q"))
            .await
            .unwrap();
        let text = prompt.as_str();

        let b = text.find("PLAN: B\n").unwrap();
        let a = text.find("PLAN: A\n").unwrap();
        let instruction = text.find(COMPARISON_INSTRUCTION).unwrap();
        assert!(b < a && a < instruction);
        assert_eq!(text.matches("PLANDETAILS: ").count(), 2);
        assert_eq!(text.matches(COMPARISON_INSTRUCTION).count(), 1);
    }

    #[test]
    fn test_question_and_content_are_sanitized() {
        let doc = Document::new(DocumentId::parse("Plan.txt").unwrap(), "TierÂ® 1 – €5");
        let original = doc.clone();
        let prompt = PromptBuilder::new().render(std::slice::from_ref(&doc), Some("Is it ™ free?"));

        assert!(prompt.as_str().contains("PLANDETAILS: Tier 1  5\n"));
        assert!(prompt.as_str().ends_with("Is it  free?"));
        assert_eq!(doc, original);
    }

    #[test]
    fn test_no_question_omits_instruction_block() {
        let doc = Document::new(DocumentId::parse("Plan.txt").unwrap(), "body");
        let prompt = PromptBuilder::new().render(&[doc], None);
        assert_eq!(
            prompt.as_str(),
            format!("{DELIMITER}\nPLAN: Plan\nPLANDETAILS: body\n{DELIMITER}\n\n")
        );
    }

    #[tokio::test]
    async fn test_missing_document_fails_without_partial_prompt() {
        let repo = MemoryRepository::new(&[("A.txt", "alpha")]);
        let err = PromptBuilder::new()
            .build(&repo, &selection(&["A.txt", "Gone.txt"]), Some("q"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
