//! Infrastructure layer for plan-compare: filesystem-backed documents,
//! configuration and secrets.

pub mod fs_document_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use fs_document_repository::FsDocumentRepository;
pub use paths::{PathError, PlanComparePaths};
pub use secret_service::SecretServiceImpl;
pub use storage::{ConfigStorage, SecretStorage};
