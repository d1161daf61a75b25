//! Preset questions and the caller-owned "current question".

mod preset;
mod state;

pub use preset::{PRESET_QUESTIONS, preset_question};
pub use state::QuestionState;
