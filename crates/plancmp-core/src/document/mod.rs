//! Plan document domain module.
//!
//! # Module Structure
//!
//! - `model`: `DocumentId`, `Document` and the validated `PlanSelection`
//! - `repository`: Repository trait for reading plan documents

mod model;
mod repository;

pub use model::{DOCUMENT_EXTENSION, Document, DocumentId, PlanSelection, SelectionError};
pub use repository::DocumentRepository;
