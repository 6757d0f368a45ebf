//! Pure anchor generation for subtopic headings.
//!
//! Level-4 headings in generated courses start with a dotted numeral
//! (`#### 4.2 Loops`). The numeral becomes the element id the "On This Page"
//! navigation scrolls to.

use std::collections::HashMap;

/// Generate a GitHub-style slug from text.
///
/// Converts text to lowercase, replaces spaces and special characters with hyphens,
/// and removes consecutive/leading/trailing hyphens.
///
/// # Examples
///
/// ```
/// use classmark::markdown::slugify;
///
/// assert_eq!(slugify("Sub Topic"), "sub-topic");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
/// ```
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                // Skip other characters
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Split a leading dotted numeral (`\d+(\.\d+)*`) off heading text.
///
/// Whatever follows the numeral stays with the rest, so `4.2: Loops` and
/// `4.2Loops` both carry the numeral `4.2`. A single `.` closing the numeral
/// is dropped when whitespace or the end of the text follows it
/// (`4.2. Loops`).
///
/// Returns the numeral and the rest as written, leading whitespace included.
/// Use [`subtopic_title`] to join them back.
///
/// # Examples
///
/// ```
/// use classmark::markdown::split_subtopic_numeral;
///
/// assert_eq!(split_subtopic_numeral("4.2 Loops"), Some(("4.2", " Loops")));
/// assert_eq!(split_subtopic_numeral("4.2: Loops"), Some(("4.2", ": Loops")));
/// assert_eq!(split_subtopic_numeral("Loops"), None);
/// ```
pub fn split_subtopic_numeral(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = digits_from(0);
    if end == 0 {
        return None;
    }

    // Extend over `.digits` groups
    while end < bytes.len() && bytes[end] == b'.' {
        let run = digits_from(end + 1);
        if run == 0 {
            break;
        }
        end += 1 + run;
    }

    let numeral = &text[..end];
    let mut rest = &text[end..];
    if let Some(after_dot) = rest.strip_prefix('.') {
        if after_dot.chars().next().is_none_or(char::is_whitespace) {
            rest = after_dot;
        }
    }

    Some((numeral, rest.trim_end()))
}

/// Join a numeral and the rest of its heading into display text.
///
/// Whitespace between them collapses to one space; anything else is kept
/// as written.
///
/// ```
/// use classmark::markdown::subtopic_title;
///
/// assert_eq!(subtopic_title("4.2", "   Loops"), "4.2 Loops");
/// assert_eq!(subtopic_title("4.2", ") Loops"), "4.2) Loops");
/// assert_eq!(subtopic_title("7", ""), "7");
/// ```
pub fn subtopic_title(numeral: &str, rest: &str) -> String {
    let trimmed = rest.trim();
    if trimmed.is_empty() {
        numeral.to_string()
    } else if rest.starts_with(char::is_whitespace) {
        format!("{numeral} {trimmed}")
    } else {
        format!("{numeral}{trimmed}")
    }
}

/// Hands out collision-free anchor ids for subtopic numerals.
///
/// The first heading numbered `4.2` gets `subtopic-4.2`; later headings with
/// the same numeral get `subtopic-4.2-1`, `subtopic-4.2-2`, and so on.
/// Numerals never contain `-`, so a suffixed id can't clash with a plain one.
#[derive(Debug, Clone)]
pub struct AnchorRegistry {
    prefix: String,
    seen: HashMap<String, usize>,
}

impl AnchorRegistry {
    /// Create a registry. The prefix is slugified so it is always a valid id
    /// fragment; an empty prefix yields bare numerals.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: slugify(prefix),
            seen: HashMap::new(),
        }
    }

    /// Return the anchor id for the next heading carrying `numeral`.
    pub fn anchor_for(&mut self, numeral: &str) -> String {
        let base = if self.prefix.is_empty() {
            numeral.to_string()
        } else {
            format!("{}-{}", self.prefix, numeral)
        };

        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}

impl Default for AnchorRegistry {
    fn default() -> Self {
        Self::new("subtopic")
    }
}
