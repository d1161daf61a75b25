/// Common questions offered next to free-text entry.
pub const PRESET_QUESTIONS: [&str; 6] = [
    "What are the differences between these plans?",
    "Which plan offers the best coverage for dental services?",
    "How do the costs compare between these plans?",
    "What are the deductibles for each plan?",
    "What are the copayments for primary care visits between these plans?",
    "What are the prescription drug benefits of these plans?",
];

/// Looks up a preset by its 1-based menu index. Index 0 selects nothing.
pub fn preset_question(index: usize) -> Option<&'static str> {
    index
        .checked_sub(1)
        .and_then(|i| PRESET_QUESTIONS.get(i))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup_is_one_based() {
        assert_eq!(preset_question(0), None);
        assert_eq!(preset_question(1), Some(PRESET_QUESTIONS[0]));
        assert_eq!(preset_question(6), Some(PRESET_QUESTIONS[5]));
        assert_eq!(preset_question(7), None);
    }
}
