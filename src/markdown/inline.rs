//! Inline passes: code spans, bold, italic.
//!
//! Each pass replaces the markup it produces with an opaque placeholder, so a
//! later pass never re-matches characters an earlier pass emitted. The
//! placeholders are expanded once, after the last pass.
//!
//! All passes work on a single line. Delimiters never pair across lines.

use memchr::memchr;

use super::escape::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN, escape_html};

/// Rendered fragments hidden from later passes.
#[derive(Debug, Default)]
struct Protected {
    spans: Vec<String>,
}

impl Protected {
    /// Store rendered HTML and return the placeholder standing in for it.
    fn protect(&mut self, html: String) -> String {
        let index = self.spans.len();
        self.spans.push(html);
        format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
    }

    /// Expand every placeholder in `text`, including placeholders nested in
    /// stored fragments.
    fn restore(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut chars = text.chars();

        while let Some(c) = chars.next() {
            if c != PLACEHOLDER_OPEN {
                result.push(c);
                continue;
            }

            let mut digits = String::new();
            for d in chars.by_ref() {
                if d == PLACEHOLDER_CLOSE {
                    break;
                }
                digits.push(d);
            }

            // Stored fragments only reference earlier indices, so this terminates
            match digits.parse::<usize>().ok().and_then(|i| self.spans.get(i)) {
                Some(span) => result.push_str(&self.restore(span)),
                None => result.push_str(&digits),
            }
        }

        result
    }
}

/// Render the inline constructs of one line to HTML.
///
/// Text outside the generated tags is HTML-escaped. Unmatched delimiters are
/// kept as literal text.
///
/// # Examples
///
/// ```
/// use classmark::markdown::render_inline;
///
/// assert_eq!(render_inline("use `x < y`"), "use <code>x &lt; y</code>");
/// assert_eq!(render_inline("**a*b*c**"), "<strong>a*b*c</strong>");
/// assert_eq!(render_inline("*so* it goes"), "<em>so</em> it goes");
/// ```
pub fn render_inline(line: &str) -> String {
    let mut protected = Protected::default();
    let text = code_spans(line, &mut protected);
    let text = bold(&text, &mut protected);
    let text = italic(&text);
    protected.restore(&text)
}

/// Plain text of one line with inline markup resolved and removed.
///
/// Delimiters that [`render_inline`] would consume disappear; unmatched ones
/// stay. The result is not escaped.
///
/// ```
/// use classmark::markdown::inline_text;
///
/// assert_eq!(inline_text("The **for** loop"), "The for loop");
/// assert_eq!(inline_text("`a < b` *or* 2 * 3"), "a < b or 2 * 3");
/// ```
pub fn inline_text(line: &str) -> String {
    let html = render_inline(line);
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    // Input `<` is always escaped, so every `<` here opens a generated tag
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#xE000;", "\u{E000}")
        .replace("&#xE001;", "\u{E001}")
        .replace("&amp;", "&")
}

/// Pass 1: escape the line and protect single-backtick code spans.
///
/// Spans are non-greedy and must be non-empty; an empty pair leaves its first
/// backtick as literal text.
fn code_spans(line: &str, protected: &mut Protected) -> String {
    let bytes = line.as_bytes();
    let mut result = String::with_capacity(line.len());
    let mut literal_start = 0;
    let mut search = 0;

    while let Some(rel) = memchr(b'`', &bytes[search..]) {
        let open = search + rel;
        let Some(rel_close) = memchr(b'`', &bytes[open + 1..]) else {
            break;
        };
        let close = open + 1 + rel_close;

        if close == open + 1 {
            search = open + 1;
            continue;
        }

        result.push_str(&escape_html(&line[literal_start..open]));
        let html = format!("<code>{}</code>", escape_html(&line[open + 1..close]));
        result.push_str(&protected.protect(html));

        literal_start = close + 1;
        search = literal_start;
    }

    result.push_str(&escape_html(&line[literal_start..]));
    result
}

/// Pass 2: `**bold**`, resolved before italic so its delimiters are consumed
/// first. Italic is applied inside the bold content before it is protected.
fn bold(text: &str, protected: &mut Protected) -> String {
    let bytes = text.as_bytes();
    let mut result = String::with_capacity(text.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if !(bytes[i] == b'*' && bytes[i + 1] == b'*') {
            i += 1;
            continue;
        }

        let content_start = i + 2;
        let opens = next_char(text, content_start).is_some_and(|c| !c.is_whitespace());
        let close = if opens {
            find_bold_close(text, content_start)
        } else {
            None
        };

        match close {
            Some(close) => {
                result.push_str(&text[literal_start..i]);
                let content = &text[content_start..close];
                let html = format!("<strong>{}</strong>", italic(content));
                result.push_str(&protected.protect(html));
                i = close + 2;
                literal_start = i;
            }
            None => i += 2,
        }
    }

    result.push_str(&text[literal_start..]);
    result
}

/// Find the first `**` after `from` that closes a bold span with non-empty
/// content.
fn find_bold_close(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    (from + 1..bytes.len().saturating_sub(1)).find(|&j| {
        bytes[j] == b'*'
            && bytes[j + 1] == b'*'
            && prev_char(text, j).is_some_and(|c| !c.is_whitespace())
    })
}

/// Pass 3: `*italic*`.
///
/// The opener may not follow an alphanumeric and must precede a
/// non-whitespace, non-`*` character. The closer must follow non-whitespace
/// and may not precede an alphanumeric. This keeps `2 * 3 * 4`, `a*b*c` and
/// list bullets literal.
fn italic(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut result = String::with_capacity(text.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' || !is_italic_open(text, i) {
            i += 1;
            continue;
        }

        match find_italic_close(text, i + 1) {
            Some(close) => {
                result.push_str(&text[literal_start..i]);
                result.push_str("<em>");
                result.push_str(&text[i + 1..close]);
                result.push_str("</em>");
                i = close + 1;
                literal_start = i;
            }
            None => i += 1,
        }
    }

    result.push_str(&text[literal_start..]);
    result
}

fn is_italic_open(text: &str, at: usize) -> bool {
    let after_ok = next_char(text, at + 1).is_some_and(|c| !c.is_whitespace() && c != '*');
    let before_ok = prev_char(text, at).is_none_or(|c| !c.is_alphanumeric());
    after_ok && before_ok
}

fn find_italic_close(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    (from + 1..bytes.len()).find(|&j| {
        bytes[j] == b'*'
            && prev_char(text, j).is_some_and(|c| !c.is_whitespace())
            && next_char(text, j + 1).is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Character starting at byte offset `at`, if any.
fn next_char(text: &str, at: usize) -> Option<char> {
    text.get(at..).and_then(|s| s.chars().next())
}

/// Character ending right before byte offset `at`, if any.
fn prev_char(text: &str, at: usize) -> Option<char> {
    text.get(..at).and_then(|s| s.chars().next_back())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(render_inline("Hello, World!"), "Hello, World!");
    }

    #[test]
    fn test_code_span() {
        assert_eq!(render_inline("call `print()` now"), "call <code>print()</code> now");
    }

    #[test]
    fn test_code_span_protects_emphasis() {
        assert_eq!(render_inline("`**not bold**`"), "<code>**not bold**</code>");
        assert_eq!(render_inline("`a*b` and *c*"), "<code>a*b</code> and <em>c</em>");
    }

    #[test]
    fn test_code_span_escapes() {
        assert_eq!(render_inline("`<div>`"), "<code>&lt;div&gt;</code>");
    }

    #[test]
    fn test_empty_code_span_is_literal() {
        assert_eq!(render_inline("``"), "``");
        assert_eq!(render_inline("``x`"), "`<code>x</code>");
    }

    #[test]
    fn test_unmatched_backtick() {
        assert_eq!(render_inline("a ` b"), "a ` b");
    }

    #[test]
    fn test_bold() {
        assert_eq!(render_inline("a **b** c"), "a <strong>b</strong> c");
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            render_inline("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(render_inline("**a*b*c**"), "<strong>a*b*c</strong>");
    }

    #[test]
    fn test_italic_inside_bold() {
        assert_eq!(
            render_inline("**very *much* so**"),
            "<strong>very <em>much</em> so</strong>"
        );
    }

    #[test]
    fn test_bold_inside_italic() {
        assert_eq!(
            render_inline("*a **b** c*"),
            "<em>a <strong>b</strong> c</em>"
        );
    }

    #[test]
    fn test_bold_needs_flanking() {
        assert_eq!(render_inline("** a **"), "** a **");
    }

    #[test]
    fn test_italic() {
        assert_eq!(render_inline("an *important* note"), "an <em>important</em> note");
    }

    #[test]
    fn test_arithmetic_is_not_italic() {
        assert_eq!(render_inline("2 * 3 * 4"), "2 * 3 * 4");
        assert_eq!(render_inline("a*b*c"), "a*b*c");
    }

    #[test]
    fn test_unmatched_star() {
        assert_eq!(render_inline("*dangling"), "*dangling");
        assert_eq!(render_inline("**dangling"), "**dangling");
    }

    #[test]
    fn test_escapes_outside_code() {
        assert_eq!(render_inline("<b>*x*</b>"), "&lt;b&gt;<em>x</em>&lt;/b&gt;");
    }

    #[test]
    fn test_forged_placeholder_stays_text() {
        assert_eq!(render_inline("\u{E000}0\u{E001}"), "&#xE000;0&#xE001;");
    }

    #[test]
    fn test_inline_text_strips_markup() {
        assert_eq!(inline_text("2.1 The **for** loop"), "2.1 The for loop");
        assert_eq!(inline_text("*a **b** c*"), "a b c");
        assert_eq!(inline_text("`x<y`"), "x<y");
    }

    #[test]
    fn test_inline_text_keeps_literal_text() {
        assert_eq!(inline_text("**dangling"), "**dangling");
        assert_eq!(inline_text("&lt; & <b>"), "&lt; & <b>");
        assert_eq!(inline_text("\u{E000}0\u{E001}"), "\u{E000}0\u{E001}");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(render_inline("é *ü* ñ"), "é <em>ü</em> ñ");
        assert_eq!(render_inline("**日本**"), "<strong>日本</strong>");
    }
}
