//! Text helpers shared by every JDL construct's `Display` implementation.

use std::fmt;

// ============================================================================
// Case conversion
// ============================================================================

/// Convert an identifier to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "MyEntity" | "my_entity" |
/// | "HTTPRequest" | "http_request" |
/// | "job_history" | "job_history" |
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Lower the first character, leaving the rest untouched (`JobHistory` → `jobHistory`).
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper the first character (`author` → `Author`).
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split an identifier into lowercase words.
///
/// Separators (`_`, `-`, whitespace) always split. A lower→upper transition
/// splits (`myApp`), and so does the last capital of an acronym run followed
/// by a lowercase letter (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase)
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

// ============================================================================
// Comment blocks
// ============================================================================

/// Write a JDL doc-comment block, each line prefixed by `indent`.
///
/// ```text
/// /**
///  * first line
///  * second line
///  */
/// ```
pub(crate) fn write_comment(f: &mut impl fmt::Write, comment: &str, indent: &str) -> fmt::Result {
    writeln!(f, "{indent}/**")?;
    for line in comment.lines() {
        if line.is_empty() {
            writeln!(f, "{indent} *")?;
        } else {
            writeln!(f, "{indent} * {line}")?;
        }
    }
    writeln!(f, "{indent} */")
}

/// `None` for missing or whitespace-only text.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
