//! Evaluation results for an assignment.
//!
//! Two record shapes exist: [`Evaluation`] rows written when an instructor (or the
//! batch grader) evaluates a submission, and [`AiEvaluationResult`] rows
//! written by the AI evaluation service. Both expose the fields the results
//! dialogs need through [`Scored`], so statistics and filtering are shared.
//!
//! - [`stats`]: averages, extremes and grade distribution
//! - [`filter`]: name search and grade/type filters
//! - [`csv`]: CSV export and download file names

pub mod csv;
pub mod filter;
pub mod stats;

use serde::{Deserialize, Serialize};

pub use csv::{ai_results_file_name, evaluations_file_name, export_ai_results_csv, export_evaluations_csv};
pub use filter::ResultFilter;
pub use stats::{PerformanceBand, ResultStats};

/// A row of the `evaluations` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: String,
    pub assignment_id: String,
    pub submission_id: String,
    pub student_name: String,
    pub total_marks: f64,
    pub obtained_marks: f64,
    pub percentage: f64,
    pub grade: String,
    #[serde(default)]
    pub correct_answers: Option<Vec<String>>,
    #[serde(default)]
    pub incorrect_answers: Option<Vec<String>>,
    #[serde(default)]
    pub partial_credit_areas: Option<Vec<String>>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub areas_for_improvement: Option<Vec<String>>,
    #[serde(default)]
    pub detailed_feedback: Option<String>,
    pub evaluation_type: String,
    #[serde(default)]
    pub batch_id: Option<String>,
    pub created_at: String,
}

/// A row of the `evaluation_results` table written by the AI grader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiEvaluationResult {
    pub id: String,
    pub student_name: String,
    pub total_marks: f64,
    pub obtained_marks: f64,
    pub percentage: f64,
    pub grade: String,
    #[serde(default)]
    pub correct_answers: Vec<String>,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
    #[serde(default)]
    pub partial_credit_areas: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub detailed_feedback: String,
    pub timestamp: String,
    pub evaluation_type: String,
}

/// Common view over graded records.
pub trait Scored {
    fn student_name(&self) -> &str;
    fn grade(&self) -> &str;
    fn percentage(&self) -> f64;
    fn evaluation_type(&self) -> &str;
}

impl Scored for Evaluation {
    fn student_name(&self) -> &str {
        &self.student_name
    }

    fn grade(&self) -> &str {
        &self.grade
    }

    fn percentage(&self) -> f64 {
        self.percentage
    }

    fn evaluation_type(&self) -> &str {
        &self.evaluation_type
    }
}

impl Scored for AiEvaluationResult {
    fn student_name(&self) -> &str {
        &self.student_name
    }

    fn grade(&self) -> &str {
        &self.grade
    }

    fn percentage(&self) -> f64 {
        self.percentage
    }

    fn evaluation_type(&self) -> &str {
        &self.evaluation_type
    }
}

impl<T: Scored + ?Sized> Scored for &T {
    fn student_name(&self) -> &str {
        (**self).student_name()
    }

    fn grade(&self) -> &str {
        (**self).grade()
    }

    fn percentage(&self) -> f64 {
        (**self).percentage()
    }

    fn evaluation_type(&self) -> &str {
        (**self).evaluation_type()
    }
}
