//! Markdown-subset → HTML rendering.
//!
//! Rendering runs in two stages. The block stage classifies each line
//! (fenced code, heading, list item, text, blank) and assigns subtopic
//! anchors in document order. The output stage renders inline constructs
//! inside headings, list items and paragraph lines, and joins paragraph
//! lines. Fenced code never reaches the inline passes.

use serde::Deserialize;

use super::escape::{escape_html, is_safe_info_string};
use super::inline::{inline_text, render_inline};
use super::slugify::{AnchorRegistry, split_subtopic_numeral, subtopic_title};

/// Options controlling the rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix of subtopic anchor ids (`subtopic` → `subtopic-4.2`).
    pub anchor_prefix: String,
    /// Glyph written at the start of every list item. Empty disables it.
    pub bullet: String,
    /// Join lines inside a paragraph with `<br>` (otherwise with `\n`).
    pub line_breaks: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            anchor_prefix: "subtopic".to_string(),
            bullet: "•".to_string(),
            line_breaks: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.anchor_prefix = prefix.into();
        self
    }

    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.bullet = bullet.into();
        self
    }

    pub fn with_line_breaks(mut self, line_breaks: bool) -> Self {
        self.line_breaks = line_breaks;
        self
    }
}

/// A subtopic heading that received an anchor id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    /// Element id, e.g. `subtopic-4.2`.
    pub id: String,
    /// The dotted numeral, e.g. `4.2`.
    pub number: String,
    /// Plain heading text with the numeral normalized, e.g. `4.2 Loops`.
    /// Inline markup is resolved and dropped.
    pub title: String,
}

/// Result of rendering a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// The rendered HTML.
    pub html: String,
    /// Anchored subtopic headings, in document order.
    pub headlines: Vec<Headline>,
}

/// A classified source line (or run of lines, for fenced code).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block<'a> {
    Heading {
        level: u8,
        anchor: Option<Anchor<'a>>,
        text: &'a str,
    },
    ListItem(&'a str),
    Code {
        info: Option<&'a str>,
        body: Vec<&'a str>,
    },
    Text(&'a str),
    Blank,
}

/// Anchor assigned to a numbered subtopic heading.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Anchor<'a> {
    id: String,
    number: &'a str,
    rest: &'a str,
}

/// Context for rendering (pure string accumulation, no I/O).
pub struct RenderContext<'a> {
    config: &'a RenderConfig,
    anchors: AnchorRegistry,
    // Accumulated output
    output: Vec<String>,
    paragraph: Vec<String>,
    headlines: Vec<Headline>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            anchors: AnchorRegistry::new(&config.anchor_prefix),
            output: Vec::new(),
            paragraph: Vec::new(),
            headlines: Vec::new(),
        }
    }

    /// Render a document, consuming the context and returning the result.
    pub fn render(mut self, document: &str) -> RenderResult {
        let lines: Vec<&str> = document.lines().collect();
        let blocks = self.classify(&lines);

        for block in &blocks {
            self.write_block(block);
        }
        self.flush_paragraph();

        log::debug!(
            "rendered {} lines into {} blocks, {} subtopic anchors",
            lines.len(),
            self.output.len(),
            self.headlines.len()
        );

        RenderResult {
            html: self.output.join("\n"),
            headlines: self.headlines,
        }
    }

    /// Block stage: fenced code first, then headings, list items and text.
    fn classify<'s>(&mut self, lines: &[&'s str]) -> Vec<Block<'s>> {
        let mut blocks = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if let Some(info) = fence_info(line) {
                let close = (i + 1..lines.len()).find(|&k| fence_info(lines[k]).is_some());
                if let Some(close) = close {
                    blocks.push(Block::Code {
                        info: Some(info).filter(|s| !s.is_empty()),
                        body: lines[i + 1..close].to_vec(),
                    });
                    i = close + 1;
                    continue;
                }
                log::warn!("unterminated code fence at line {}, keeping it as text", i + 1);
            }

            let block = if line.trim().is_empty() {
                Block::Blank
            } else if let Some((level, text)) = heading(line) {
                let anchor = if level == 4 {
                    split_subtopic_numeral(text).map(|(number, rest)| Anchor {
                        id: self.anchor(number, rest),
                        number,
                        rest,
                    })
                } else {
                    None
                };
                Block::Heading {
                    level,
                    anchor,
                    text,
                }
            } else if let Some(item) = list_item(line) {
                Block::ListItem(item)
            } else {
                Block::Text(line)
            };

            log::trace!("line {}: {:?}", i + 1, block);
            blocks.push(block);
            i += 1;
        }

        blocks
    }

    /// Allocate an anchor for a subtopic numeral and record its headline.
    fn anchor(&mut self, number: &str, rest: &str) -> String {
        let id = self.anchors.anchor_for(number);
        let title = subtopic_title(number, &inline_text(rest));
        self.headlines.push(Headline {
            id: id.clone(),
            number: number.to_string(),
            title,
        });
        id
    }

    fn write_block(&mut self, block: &Block<'_>) {
        match block {
            Block::Text(line) => {
                self.paragraph.push(render_inline(line));
            }
            Block::Blank => self.flush_paragraph(),
            Block::Heading {
                level,
                anchor,
                text,
            } => {
                self.flush_paragraph();
                let tag = heading_tag(*level);
                let html = match anchor {
                    Some(anchor) => {
                        let visible = subtopic_title(
                            &escape_html(anchor.number),
                            &render_inline(anchor.rest),
                        );
                        format!("<{tag} id=\"{}\">{visible}</{tag}>", anchor.id)
                    }
                    None => format!("<{tag}>{}</{tag}>", render_inline(text)),
                };
                self.output.push(html);
            }
            Block::ListItem(item) => {
                self.flush_paragraph();
                let content = render_inline(item);
                let html = if self.config.bullet.is_empty() {
                    format!("<li>{content}</li>")
                } else {
                    format!("<li>{} {content}</li>", escape_html(&self.config.bullet))
                };
                self.output.push(html);
            }
            Block::Code { info, body } => {
                self.flush_paragraph();
                let class = info
                    .filter(|info| is_safe_info_string(info))
                    .map(|info| format!(" class=\"language-{info}\""))
                    .unwrap_or_default();
                self.output.push(format!(
                    "<pre><code{class}>{}</code></pre>",
                    escape_html(&body.join("\n"))
                ));
            }
        }
    }

    /// Close the open paragraph, if any.
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joiner = if self.config.line_breaks { "<br>" } else { "\n" };
        let html = format!("<p>{}</p>", self.paragraph.join(joiner));
        self.paragraph.clear();
        self.output.push(html);
    }
}

/// Info string of a fence line (```` ```lang ````), or `None` if the line is
/// not a fence.
fn fence_info(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix("```").map(str::trim)
}

/// Heading level (1-4) and content of a heading line.
///
/// Requires 1-4 `#` at the very start of the line, followed by a space or tab.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=4).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

/// `#` and `##` share the top level; pages supply their own `h1`.
fn heading_tag(level: u8) -> &'static str {
    match level {
        1 | 2 => "h2",
        3 => "h3",
        _ => "h4",
    }
}

/// Content of a `* ` or `- ` list line.
fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
        .map(str::trim)
}

/// Render a document to HTML with the default configuration.
///
/// This never fails: constructs that don't match are rendered as literal,
/// escaped text, and every tag the renderer opens is closed.
///
/// # Examples
///
/// ```
/// use classmark::markdown::render;
///
/// assert_eq!(render("Hello"), "<p>Hello</p>");
/// assert_eq!(
///     render("#### 4.2 Loops"),
///     "<h4 id=\"subtopic-4.2\">4.2 Loops</h4>"
/// );
/// ```
pub fn render(document: &str) -> String {
    render_with(document, &RenderConfig::default()).html
}

/// Render a document with explicit options, also returning the anchored
/// subtopic headlines.
pub fn render_with(document: &str, config: &RenderConfig) -> RenderResult {
    RenderContext::new(config).render(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_empty_document() {
        init_logger();
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n  \n"), "");
    }

    #[test]
    fn test_simple_paragraph() {
        assert_eq!(render("Hello, World!"), "<p>Hello, World!</p>");
    }

    #[test]
    fn test_line_breaks_and_paragraphs() {
        assert_eq!(
            render("one\ntwo\n\nthree"),
            "<p>one<br>two</p>\n<p>three</p>"
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(render("one\r\ntwo"), "<p>one<br>two</p>");
    }

    #[test]
    fn test_without_line_breaks() {
        let config = RenderConfig::new().with_line_breaks(false);
        assert_eq!(
            render_with("one\ntwo", &config).html,
            "<p>one\ntwo</p>"
        );
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("# Course"), "<h2>Course</h2>");
        assert_eq!(render("## Topic"), "<h2>Topic</h2>");
        assert_eq!(render("### Section"), "<h3>Section</h3>");
        assert_eq!(render("#### Details"), "<h4>Details</h4>");
    }

    #[test]
    fn test_not_headings() {
        assert_eq!(render("##### Deep"), "<p>##### Deep</p>");
        assert_eq!(render("#hashtag"), "<p>#hashtag</p>");
        assert_eq!(render(" ## indented"), "<p> ## indented</p>");
    }

    #[test]
    fn test_subtopic_anchor() {
        let result = render_with("#### 4.2 Loops", &RenderConfig::default());
        assert_eq!(result.html, "<h4 id=\"subtopic-4.2\">4.2 Loops</h4>");
        assert_eq!(
            result.headlines,
            vec![Headline {
                id: "subtopic-4.2".to_string(),
                number: "4.2".to_string(),
                title: "4.2 Loops".to_string(),
            }]
        );
    }

    #[test]
    fn test_subtopic_anchor_only_on_level_four() {
        assert_eq!(render("### 4.2 Loops"), "<h3>4.2 Loops</h3>");
        assert_eq!(render("## 4 Control Flow"), "<h2>4 Control Flow</h2>");
    }

    #[test]
    fn test_subtopic_trailing_dot_normalized() {
        assert_eq!(
            render("#### 4.2. Loops"),
            "<h4 id=\"subtopic-4.2\">4.2 Loops</h4>"
        );
    }

    #[test]
    fn test_subtopic_anchors_are_unique() {
        let html = render("#### 1.1 A\n#### 1.1 B");
        assert!(html.contains("id=\"subtopic-1.1\""));
        assert!(html.contains("id=\"subtopic-1.1-1\""));
    }

    #[test]
    fn test_subtopic_with_emphasis() {
        assert_eq!(
            render("#### 2.1 The **for** loop"),
            "<h4 id=\"subtopic-2.1\">2.1 The <strong>for</strong> loop</h4>"
        );
    }

    #[test]
    fn test_subtopic_numeral_with_punctuation() {
        assert_eq!(
            render("#### 4.2: Loops"),
            "<h4 id=\"subtopic-4.2\">4.2: Loops</h4>"
        );
        assert_eq!(
            render("#### 4.2) Loops"),
            "<h4 id=\"subtopic-4.2\">4.2) Loops</h4>"
        );
        assert_eq!(
            render("#### 4.2Loops"),
            "<h4 id=\"subtopic-4.2\">4.2Loops</h4>"
        );
    }

    #[test]
    fn test_headline_title_is_plain_text() {
        let result = render_with("#### 2.1 The **for** loop: `range`", &RenderConfig::default());
        assert_eq!(result.headlines[0].title, "2.1 The for loop: range");
    }

    #[test]
    fn test_custom_anchor_prefix() {
        let config = RenderConfig::new().with_anchor_prefix("part");
        assert_eq!(
            render_with("#### 3 Recap", &config).html,
            "<h4 id=\"part-3\">3 Recap</h4>"
        );
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            render("* one\n- two"),
            "<li>• one</li>\n<li>• two</li>"
        );
    }

    #[test]
    fn test_list_item_without_bullet() {
        let config = RenderConfig::new().with_bullet("");
        assert_eq!(render_with("- item", &config).html, "<li>item</li>");
    }

    #[test]
    fn test_list_item_is_not_italic() {
        let html = render("* item one");
        assert_eq!(html, "<li>• item one</li>");
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_list_item_ends_paragraph() {
        assert_eq!(
            render("Intro:\n* a\nAfter"),
            "<p>Intro:</p>\n<li>• a</li>\n<p>After</p>"
        );
    }

    #[test]
    fn test_fenced_code() {
        assert_eq!(
            render("```python\nprint(\"hi\")\n```"),
            "<pre><code class=\"language-python\">print(\"hi\")</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_is_opaque() {
        let html = render("```\n**not bold**\n# not heading\n* not item\n```");
        assert_eq!(
            html,
            "<pre><code>**not bold**\n# not heading\n* not item</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_escapes() {
        assert_eq!(
            render("```\n<b>&</b>\n```"),
            "<pre><code>&lt;b&gt;&amp;&lt;/b&gt;</code></pre>"
        );
    }

    #[test]
    fn test_fence_unsafe_info_dropped() {
        assert_eq!(
            render("```x\" onload=\"y\na\n```"),
            "<pre><code>a</code></pre>"
        );
    }

    #[test]
    fn test_unterminated_fence_is_text() {
        init_logger();
        assert_eq!(render("```\ncode"), "<p>```<br>code</p>");
    }

    #[test]
    fn test_escaping() {
        let html = render("<script>alert(1)</script>");
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_mixed_document() {
        let doc = "## Loops\n\nLoops repeat *work*.\n\n#### 4.1 While\n* uses `while`\n\n```\nwhile x:\n    pass\n```";
        let expected = "<h2>Loops</h2>\n\
            <p>Loops repeat <em>work</em>.</p>\n\
            <h4 id=\"subtopic-4.1\">4.1 While</h4>\n\
            <li>• uses <code>while</code></li>\n\
            <pre><code>while x:\n    pass</code></pre>";
        assert_eq!(render(doc), expected);
    }
}
