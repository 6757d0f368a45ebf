//! Markdown-subset → HTML rendering for generated course content.
//!
//! The course generator writes a small markdown dialect: `#`..`####` headings
//! (numbered `####` subtopics), `*`/`-` list lines, fenced and inline code,
//! `**bold**`, `*italic*` and blank-line paragraphs. This module turns it into
//! HTML that can be injected into the page directly.
//!
//! - [`escape`]: HTML escaping of untrusted text
//! - [`slugify`]: subtopic numerals and collision-free anchor ids
//! - [`inline`]: inline code and emphasis passes
//! - [`render`]: block classification and document assembly
//!
//! ## Design Notes
//!
//! - **Fixed pass order**: fenced code, headings and list lines are classified
//!   first; inline code, then bold, then italic run on the remaining text;
//!   paragraphs are joined last. A pass never sees markup an earlier pass
//!   produced: fenced code is kept out of the inline passes entirely, and
//!   inline results are swapped for placeholders until the end.
//! - **Escape first**: input text is escaped before any tag is added, so the
//!   output only contains tags the renderer emits, always balanced.
//! - **No failure mode**: anything that doesn't match a construct is literal
//!   text.

mod escape;
mod inline;
mod render;
mod slugify;

pub use escape::{escape_html, is_safe_info_string};
pub use inline::{inline_text, render_inline};
pub use render::{Headline, RenderConfig, RenderContext, RenderResult, render, render_with};
pub use slugify::{AnchorRegistry, slugify, split_subtopic_numeral, subtopic_title};
