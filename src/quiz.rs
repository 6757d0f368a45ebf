//! Multiple-choice quizzes generated from uploaded material.
//!
//! The MCQ service serves a quiz as a [`QuizDetail`] and accepts a
//! [`QuizAnswers`] map on submission. Scoring here mirrors the service so a
//! result can be shown without a round trip.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Quiz metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub total_questions: usize,
    pub created_at: String,
}

/// A single multiple-choice question. `options` maps option keys (`A`, `B`,
/// ...) to their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question_number: u32,
    pub question_text: String,
    pub options: BTreeMap<String, String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Response of `GET /quiz/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDetail {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

impl QuizDetail {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Chosen option key per question id.
pub type QuizAnswers = HashMap<String, String>;

/// Outcome of a submitted quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResults {
    pub score: usize,
    pub total_questions: usize,
    pub percentage: f64,
}

impl QuizResults {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Check that every question has an answer.
pub fn ensure_complete(questions: &[Question], answers: &QuizAnswers) -> Result<()> {
    let answered = questions
        .iter()
        .filter(|q| answers.get(&q.id).is_some_and(|a| !a.trim().is_empty()))
        .count();

    if answered < questions.len() {
        return Err(Error::IncompleteQuiz {
            answered,
            total: questions.len(),
        });
    }
    Ok(())
}

/// Score answers against the answer key.
///
/// Keys are compared after trimming, ignoring case. Unanswered questions
/// count as wrong; an empty quiz scores 0%.
pub fn score(questions: &[Question], answers: &QuizAnswers) -> QuizResults {
    let score = questions
        .iter()
        .filter(|q| {
            answers
                .get(&q.id)
                .is_some_and(|a| a.trim().eq_ignore_ascii_case(q.correct_answer.trim()))
        })
        .count();

    let total_questions = questions.len();
    let percentage = if total_questions == 0 {
        0.0
    } else {
        score as f64 / total_questions as f64 * 100.0
    };

    log::debug!("quiz scored {score}/{total_questions}");

    QuizResults {
        score,
        total_questions,
        percentage,
    }
}
