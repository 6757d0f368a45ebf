//! Pure HTML escaping utilities.
//!
//! Course content comes from an AI service and is never trusted. Every piece
//! of input text passes through [`escape_html`] before any markup is added, so
//! the only tags in rendered output are the ones the renderer emits itself.

/// Start of a protected placeholder inside the renderer.
pub(crate) const PLACEHOLDER_OPEN: char = '\u{E000}';
/// End of a protected placeholder inside the renderer.
pub(crate) const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// Escape text for inclusion in HTML element content.
///
/// Escapes `&`, `<` and `>`. Quotes are left alone: escaped text is only ever
/// placed between tags, never inside attribute values. The two private-use
/// characters the renderer reserves for placeholders are written as numeric
/// character references so input can never forge one.
///
/// # Examples
///
/// ```
/// use classmark::markdown::escape_html;
///
/// assert_eq!(escape_html("<b>"), "&lt;b&gt;");
/// assert_eq!(escape_html("a & b"), "a &amp; b");
/// assert_eq!(escape_html("\"quoted\""), "\"quoted\"");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            PLACEHOLDER_OPEN => result.push_str("&#xE000;"),
            PLACEHOLDER_CLOSE => result.push_str("&#xE001;"),
            _ => result.push(c),
        }
    }

    result
}

/// Check whether a fence info string can be used verbatim in a class name.
///
/// Accepts ASCII alphanumerics and `_ + . # -`, which covers the language tags
/// the course generator emits (`python`, `c++`, `c#`, `objective-c`).
pub fn is_safe_info_string(info: &str) -> bool {
    !info.is_empty()
        && info
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '.' | '#' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_html("Loops and conditions"), "Loops and conditions");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_ampersand_first() {
        // An existing entity is escaped again, not passed through
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_placeholder_chars() {
        assert_eq!(escape_html("a\u{E000}0\u{E001}b"), "a&#xE000;0&#xE001;b");
    }

    #[test]
    fn test_escape_markdown_chars_untouched() {
        assert_eq!(escape_html("**bold** `code` # x"), "**bold** `code` # x");
    }

    #[test]
    fn test_info_string() {
        assert!(is_safe_info_string("python"));
        assert!(is_safe_info_string("c++"));
        assert!(is_safe_info_string("c#"));
        assert!(!is_safe_info_string(""));
        assert!(!is_safe_info_string("py thon"));
        assert!(!is_safe_info_string("x\"onclick"));
    }
}
