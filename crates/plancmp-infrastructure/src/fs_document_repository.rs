//! Directory-backed plan document repository.
//!
//! Every `*.txt` file directly inside the data directory is a selectable plan.
//! Subdirectories and other extensions are ignored.

use plancmp_core::document::{Document, DocumentId, DocumentRepository};
use plancmp_core::error::{PlanCompareError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FsDocumentRepository {
    data_dir: PathBuf,
}

impl FsDocumentRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn document_path(&self, id: &DocumentId) -> PathBuf {
        self.data_dir.join(id.as_str())
    }
}

#[async_trait::async_trait]
impl DocumentRepository for FsDocumentRepository {
    async fn list(&self) -> Result<Vec<DocumentId>> {
        let mut entries = tokio::fs::read_dir(&self.data_dir).await.map_err(|e| {
            PlanCompareError::io(format!(
                "Failed to read document directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            if let Ok(id) = DocumentId::parse(name) {
                ids.push(id);
            }
        }

        ids.sort();
        tracing::debug!(count = ids.len(), dir = %self.data_dir.display(), "Listed plan documents");
        Ok(ids)
    }

    async fn load(&self, id: &DocumentId) -> Result<Document> {
        let path = self.document_path(id);
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => PlanCompareError::not_found("document", id.as_str()),
            _ => PlanCompareError::io(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        // Invalid UTF-8 turns into U+FFFD, which sanitizing strips later.
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Document::new(id.clone(), content))
    }
}
