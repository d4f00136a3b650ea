//! Tokenizer for Irony assembly text.

/// Split a single line of assembly text into tokens.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line. Tokens keep their
/// case: variable names are case-sensitive.
pub(crate) fn tokenize_line(line: &str) -> Vec<&str> {
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };
    line.split_whitespace().collect()
}
