//! Result list filtering.

use serde::Deserialize;

use super::Scored;

/// Filters applied to a result list before display or export.
///
/// `None` for grade or evaluation type means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResultFilter {
    /// Case-insensitive substring of the student name.
    pub search: String,
    pub grade: Option<String>,
    pub evaluation_type: Option<String>,
}

impl ResultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_evaluation_type(mut self, evaluation_type: impl Into<String>) -> Self {
        self.evaluation_type = Some(evaluation_type.into());
        self
    }

    /// Check a single record.
    pub fn matches<T: Scored>(&self, record: &T) -> bool {
        let matches_search = self.search.is_empty()
            || record
                .student_name()
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let matches_grade = self.grade.as_deref().is_none_or(|g| g == record.grade());
        let matches_type = self
            .evaluation_type
            .as_deref()
            .is_none_or(|t| t == record.evaluation_type());

        matches_search && matches_grade && matches_type
    }

    /// Keep matching records, preserving order.
    pub fn apply<'a, T: Scored>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}
