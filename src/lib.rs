//! # classmark
//!
//! The data-transformation core of the virtual classroom front end.
//!
//! ## Features
//!
//! - Render AI-generated course content (a small markdown dialect) to HTML,
//!   with anchor ids for numbered subtopics
//! - Load generated courses and derive their "On This Page" navigation
//! - Summarize, filter and export evaluation results as CSV
//! - Check and score multiple-choice quizzes
//!
//! ## Quick Start
//!
//! ```
//! use classmark::markdown::render;
//!
//! let html = render("#### 4.2 Loops\n\nUse `for` to *repeat* work.");
//! assert_eq!(
//!     html,
//!     "<h4 id=\"subtopic-4.2\">4.2 Loops</h4>\n<p>Use <code>for</code> to <em>repeat</em> work.</p>"
//! );
//! ```
//!
//! ## Working with Courses
//!
//! ```
//! use classmark::course::CourseData;
//! use classmark::markdown::RenderConfig;
//!
//! let course = CourseData::from_json(
//!     r###"{"toc": [{"id": "t1", "title": "Intro", "number": "1"}],
//!         "content": {"t1": "## Intro\n\n#### 1.1 Setup"}}"###,
//! ).unwrap();
//!
//! let topic = course.first_topic().unwrap();
//! let rendered = course.render_topic(&topic.id, &RenderConfig::default()).unwrap();
//! assert_eq!(rendered.headlines[0].id, "subtopic-1.1");
//! ```

pub mod course;
pub mod error;
pub mod markdown;
pub mod quiz;
pub mod results;
pub mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use course::{CourseData, CourseRequest, HeadlineItem, TocItem};
pub use error::{Error, Result};
pub use markdown::{RenderConfig, render, render_with};
pub use results::{AiEvaluationResult, Evaluation, ResultFilter, ResultStats};
