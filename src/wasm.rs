//! WASM bindings for the browser front end.
//!
//! The course page, results dialogs and quiz page call into these functions
//! with the JSON they fetched; results come back as strings.

use wasm_bindgen::prelude::*;

use crate::course::CourseData;
use crate::markdown::{RenderConfig, render};
use crate::quiz::{self, QuizAnswers, QuizDetail};
use crate::results::{self, AiEvaluationResult, Evaluation};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Render course markdown to HTML.
#[wasm_bindgen]
pub fn render_markdown(document: &str) -> String {
    render(document)
}

/// Render one topic of a generated course.
///
/// Takes the course JSON as returned by the course-generation service.
#[wasm_bindgen]
pub fn render_course_topic(course_json: &str, topic_id: &str) -> Result<String, JsValue> {
    let course = CourseData::from_json(course_json).map_err(to_js)?;
    let rendered = course
        .render_topic(topic_id, &RenderConfig::default())
        .map_err(to_js)?;
    Ok(rendered.html)
}

/// Export a JSON array of `evaluations` rows to CSV.
#[wasm_bindgen]
pub fn export_evaluations_csv(evaluations_json: &str) -> Result<String, JsValue> {
    let evaluations: Vec<Evaluation> = serde_json::from_str(evaluations_json).map_err(to_js)?;
    results::export_evaluations_csv(&evaluations).map_err(to_js)
}

/// Export a JSON array of AI grader rows to CSV.
#[wasm_bindgen]
pub fn export_ai_results_csv(results_json: &str) -> Result<String, JsValue> {
    let records: Vec<AiEvaluationResult> = serde_json::from_str(results_json).map_err(to_js)?;
    results::export_ai_results_csv(&records).map_err(to_js)
}

/// Score a quiz locally.
///
/// Takes the quiz JSON (`GET /quiz/{id}` payload) and the answers object and
/// returns the results as JSON. Fails if any question is unanswered.
#[wasm_bindgen]
pub fn score_quiz(quiz_json: &str, answers_json: &str) -> Result<String, JsValue> {
    let detail = QuizDetail::from_json(quiz_json).map_err(to_js)?;
    let answers: QuizAnswers = serde_json::from_str(answers_json).map_err(to_js)?;
    quiz::ensure_complete(&detail.questions, &answers).map_err(to_js)?;
    let results = quiz::score(&detail.questions, &answers);
    serde_json::to_string(&results).map_err(to_js)
}
