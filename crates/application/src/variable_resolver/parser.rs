//! Placeholder scanner
//!
//! Finds `{{name}}` references with their positions. Used to report which
//! placeholders survived interpolation.

use std::ops::Range;

/// A `{{name}}` reference found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The text between the braces, untrimmed.
    pub name: String,
    /// Byte range of the whole placeholder, braces included.
    pub span: Range<usize>,
}

/// Returns every non-empty `{{name}}` in `input`, left to right.
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut cursor = 0;

    while let Some(open) = input[cursor..].find("{{").map(|i| i + cursor) {
        let name_start = open + 2;
        let Some(close) = input[name_start..].find("}}").map(|i| i + name_start) else {
            break;
        };
        let name = &input[name_start..close];

        // `{{{x}}}` or `{{a{{b}}`: retry from the next opening brace.
        if name.contains('{') {
            cursor = open + 1;
            continue;
        }

        if !name.is_empty() {
            placeholders.push(Placeholder {
                name: name.to_string(),
                span: open..close + 2,
            });
        }
        cursor = close + 2;
    }

    placeholders
}

/// Returns true if the input contains at least one placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    !parse_placeholders(input).is_empty()
}

/// Returns the distinct placeholder names in `input`, first-seen order.
#[must_use]
pub fn unresolved_names(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for placeholder in parse_placeholders(input) {
        if !names.contains(&placeholder.name) {
            names.push(placeholder.name);
        }
    }
    names
}
