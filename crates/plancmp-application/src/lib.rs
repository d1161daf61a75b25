//! Application layer for plan-compare.
//!
//! Coordinates the domain and the outer integrations into the user-facing
//! comparison flow.

pub mod comparison_usecase;
pub mod request;

pub use comparison_usecase::{Analysis, ComparisonOutcome, ComparisonUseCase};
pub use request::{ComparisonRequest, InputWarning};
