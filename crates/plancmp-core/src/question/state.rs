use super::preset::preset_question;

/// The question the user is currently working on.
///
/// Owned by whichever front end drives the comparison; choosing a preset
/// overwrites it and free text replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionState {
    current: String,
}

impl QuestionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Replaces the question with free text.
    pub fn set(&mut self, text: impl Into<String>) {
        self.current = text.into();
    }

    /// Applies a preset menu choice. Returns `false` (and keeps the current
    /// question) for the placeholder or an unknown index.
    pub fn choose_preset(&mut self, index: usize) -> bool {
        match preset_question(index) {
            Some(question) => {
                self.current = question.to_string();
                true
            }
            None => false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.current.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::PRESET_QUESTIONS;

    #[test]
    fn test_preset_overwrites_free_text() {
        let mut state = QuestionState::new();
        assert!(state.is_blank());

        state.set("my own question");
        assert!(state.choose_preset(3));
        assert_eq!(state.current(), PRESET_QUESTIONS[2]);
    }

    #[test]
    fn test_placeholder_keeps_current_question() {
        let mut state = QuestionState::new();
        state.set("keep me");
        assert!(!state.choose_preset(0));
        assert!(!state.choose_preset(99));
        assert_eq!(state.current(), "keep me");
    }
}
