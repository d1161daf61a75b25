/// Characters a markdown renderer would otherwise interpret.
pub const MARKDOWN_SPECIAL_CHARS: [char; 12] =
    ['$', '*', '_', '[', ']', '(', ')', '#', '+', '-', '.', '!'];

/// Prefixes every markdown-significant character with a backslash.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
