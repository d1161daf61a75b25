//! Plan document domain model.

use crate::error::{PlanCompareError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// File extension of selectable plan documents.
pub const DOCUMENT_EXTENSION: &str = "txt";

/// Identifier of a plan document: its bare file name, e.g. `PlanA.txt`.
///
/// Only plain `.txt` file names are accepted, so an id can never address a
/// file outside the document directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Validates and wraps a file name.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let path = Path::new(&raw);
        let is_bare_name = !raw.is_empty()
            && !raw.contains(['/', '\\'])
            && raw != "."
            && raw != ".."
            && path.file_name().is_some_and(|name| name == raw.as_str());
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext == DOCUMENT_EXTENSION);

        if is_bare_name && has_extension {
            Ok(Self(raw))
        } else {
            Err(PlanCompareError::not_found("document", raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name: the file name without its extension.
    pub fn display_name(&self) -> &str {
        Path::new(&self.0)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = PlanCompareError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

/// A plan document as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    /// Raw, unsanitized text content
    pub content: String,
}

impl Document {
    pub fn new(id: DocumentId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.id.display_name()
    }
}

/// Why a list of document ids is not a usable selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no plan selected")]
    Empty,
    #[error("{selected} plans selected, at most {max} can be compared")]
    TooMany { selected: usize, max: usize },
}

/// The ordered, deduplicated plans picked for one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSelection {
    ids: Vec<DocumentId>,
}

impl PlanSelection {
    /// Builds a selection, dropping repeated ids while keeping first-pick order.
    pub fn new(
        ids: impl IntoIterator<Item = DocumentId>,
        max: usize,
    ) -> std::result::Result<Self, SelectionError> {
        let mut unique: Vec<DocumentId> = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        if unique.is_empty() {
            return Err(SelectionError::Empty);
        }
        if unique.len() > max {
            return Err(SelectionError::TooMany {
                selected: unique.len(),
                max,
            });
        }

        Ok(Self { ids: unique })
    }

    pub fn ids(&self) -> &[DocumentId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
