use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::markdown::{RenderConfig, RenderResult, render_with};

/// A generated course, as returned by the course-generation service.
///
/// Topic content is raw markdown keyed by [`TocItem::id`]; it is rendered on
/// demand with [`CourseData::render_topic`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseData {
    pub toc: Vec<TocItem>,
    #[serde(default)]
    pub content: HashMap<String, String>,
    #[serde(default)]
    pub headlines: HashMap<String, Vec<HeadlineItem>>,
}

/// A table of contents entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    pub id: String,
    pub title: String,
    pub number: String,
}

/// An "On This Page" entry pointing at a subtopic anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineItem {
    pub id: String,
    pub title: String,
}

impl CourseData {
    /// Parse the service's JSON response.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The topic a freshly generated course opens on.
    pub fn first_topic(&self) -> Option<&TocItem> {
        self.toc.first()
    }

    /// Look up a table of contents entry by topic id.
    pub fn topic(&self, id: &str) -> Option<&TocItem> {
        self.toc.iter().find(|item| item.id == id)
    }

    /// Raw markdown for a topic.
    pub fn content(&self, id: &str) -> Option<&str> {
        self.content.get(id).map(String::as_str)
    }

    /// Render a topic's markdown to HTML.
    pub fn render_topic(&self, id: &str, config: &RenderConfig) -> Result<RenderResult> {
        let content = self
            .content(id)
            .ok_or_else(|| Error::UnknownTopic(id.to_string()))?;
        Ok(render_with(content, config))
    }

    /// Navigation entries for a topic.
    ///
    /// Uses the headlines the service sent when it sent any for this topic;
    /// otherwise derives them from the subtopic anchors in the rendered
    /// content, so the entries always point at ids that exist on the page.
    pub fn headlines_for(&self, id: &str, config: &RenderConfig) -> Vec<HeadlineItem> {
        if let Some(headlines) = self.headlines.get(id).filter(|h| !h.is_empty()) {
            return headlines.clone();
        }

        let Some(content) = self.content(id) else {
            return Vec::new();
        };

        let derived: Vec<HeadlineItem> = render_with(content, config)
            .headlines
            .into_iter()
            .map(|h| HeadlineItem {
                id: h.id,
                title: h.title,
            })
            .collect();

        log::debug!(
            "topic {id}: no headlines from service, derived {} from content",
            derived.len()
        );
        derived
    }
}

/// Request body for the course-generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequest {
    pub subject: String,
}

impl CourseRequest {
    /// Build a request, trimming the subject. A blank subject is rejected.
    pub fn new(subject: &str) -> Result<Self> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(Error::EmptySubject);
        }
        Ok(Self {
            subject: subject.to_string(),
        })
    }

    /// Serialize to the JSON body the endpoint expects.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
