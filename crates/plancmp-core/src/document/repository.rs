//! Document repository trait.

use super::model::{Document, DocumentId};
use crate::error::Result;

/// Read-only access to the plan documents a user can pick from.
///
/// Implementations decide where documents live (a local directory, an
/// in-memory fixture). Documents are immutable once read.
#[async_trait::async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Lists every selectable document, sorted by id.
    async fn list(&self) -> Result<Vec<DocumentId>>;

    /// Reads one document.
    ///
    /// # Returns
    ///
    /// - `Ok(Document)`: The document and its raw content
    /// - `Err(PlanCompareError::NotFound)`: No such document
    /// - `Err(PlanCompareError::Io)`: The document exists but could not be read
    async fn load(&self, id: &DocumentId) -> Result<Document>;
}
