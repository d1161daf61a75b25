//! Text sanitization applied to document content and questions before they
//! enter a prompt.
//!
//! Plan documents are often extracted from PDFs and carry mis-decoded
//! trademark signs (`Â®`, `Â©`, `â„¢`). Those artifacts are stripped first,
//! then everything that is not ASCII text.

/// Characters making up the mis-decoded forms of `®`, `©` and `™`.
pub const ARTIFACT_CHARS: [char; 6] = ['Â', '®', '©', 'â', '„', '¢'];

/// Returns `text` with artifact characters and non-ASCII-text characters removed.
///
/// Printable ASCII plus `\n`, `\r` and `\t` survive; other control characters
/// and all non-ASCII characters are dropped. Never fails and never grows the
/// input. Applying it twice is the same as applying it once.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !ARTIFACT_CHARS.contains(c))
        .filter(|c| is_ascii_text(*c))
        .collect()
}

fn is_ascii_text(c: char) -> bool {
    matches!(c, ' '..='~' | '\n' | '\r' | '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_mojibake_trademarks() {
        assert_eq!(sanitize("Blue CrossÂ® Plan â„¢"), "Blue Cross Plan ");
    }

    #[test]
    fn test_strips_non_ascii() {
        assert_eq!(sanitize("Café – 100€ 🙂"), "Caf  100 ");
    }

    #[test]
    fn test_keeps_currency_and_punctuation() {
        assert_eq!(sanitize("Cost: $100 (copay) #1!"), "Cost: $100 (copay) #1!");
    }

    #[test]
    fn test_keeps_line_structure_drops_other_controls() {
        assert_eq!(sanitize("a\r\n\tb\u{0}\u{7}\u{7f}c"), "a\r\n\tbc");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "Deductible: $1,500 / â‚¬ Â© 2024",
            "line one\nline two\u{1b}[0m",
            "日本語 and ASCII",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once);
            assert!(once.len() <= sample.len());
            assert!(once.chars().all(is_ascii_text));
        }
    }
}
