//! Domain layer for plan-compare.
//!
//! Holds the pure pieces of a comparison (sanitizing, prompt rendering,
//! answer extraction, markdown escaping) and the traits the outer layers
//! implement (`DocumentRepository`, `InferenceClient`, `SecretService`).

pub mod config;
pub mod document;
pub mod error;
pub mod inference;
pub mod markdown;
pub mod prompt;
pub mod question;
pub mod response;
pub mod sanitizer;
pub mod secret;

pub use error::{PlanCompareError, Result};
