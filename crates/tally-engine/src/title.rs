//! Title normalization -- derive stable grouping keys from raw event titles.

/// Grouping key assigned to events with a missing or blank title.
pub const UNTITLED: &str = "(untitled)";

/// Canonicalize a raw event title into a grouping key.
///
/// Leading and trailing whitespace (including newlines) is trimmed; a
/// missing or blank title maps to [`UNTITLED`]; anything else is lowercased.
/// Two titles differing only in case or surrounding whitespace map to the
/// same key.
pub fn normalize_title(raw: Option<&str>) -> String {
    let trimmed = raw.unwrap_or("").trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// Uppercase the first character of each whitespace-separated word.
///
/// Fallback display form for groups whose members all lack a usable title.
/// Words collapse to single spaces; non-alphabetic leading characters pass
/// through unchanged.
pub fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
