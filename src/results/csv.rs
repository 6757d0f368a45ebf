//! CSV export of evaluation results.
//!
//! Output is RFC 4180 CSV with `\n` row separators and no trailing newline.
//! Fields containing a comma, quote or line break are quoted.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime};

use super::{AiEvaluationResult, Evaluation};
use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const EVALUATION_HEADER: [&str; 6] = [
    "Student Name",
    "Total Marks",
    "Obtained Marks",
    "Percentage",
    "Grade",
    "Evaluation Date",
];

const AI_RESULT_HEADER: [&str; 7] = [
    "Student Name",
    "Grade",
    "Percentage",
    "Total Marks",
    "Obtained Marks",
    "Evaluation Type",
    "Timestamp",
];

/// Export `evaluations` rows.
///
/// Percentages are written with two decimals, dates as `YYYY-MM-DD HH:MM:SS`.
pub fn export_evaluations_csv<'a, I>(evaluations: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Evaluation>,
{
    let mut rows = vec![join_row(EVALUATION_HEADER.iter().map(|s| s.to_string()))];

    for evaluation in evaluations {
        rows.push(join_row([
            evaluation.student_name.clone(),
            evaluation.total_marks.to_string(),
            evaluation.obtained_marks.to_string(),
            format!("{:.2}", evaluation.percentage),
            evaluation.grade.clone(),
            format_timestamp(&evaluation.created_at)?,
        ]));
    }

    log::debug!("exported {} evaluation rows", rows.len() - 1);
    Ok(rows.join("\n"))
}

/// Export AI grader rows. Numbers are written in their shortest form.
pub fn export_ai_results_csv<'a, I>(results: I) -> Result<String>
where
    I: IntoIterator<Item = &'a AiEvaluationResult>,
{
    let mut rows = vec![join_row(AI_RESULT_HEADER.iter().map(|s| s.to_string()))];

    for result in results {
        rows.push(join_row([
            result.student_name.clone(),
            result.grade.clone(),
            result.percentage.to_string(),
            result.total_marks.to_string(),
            result.obtained_marks.to_string(),
            result.evaluation_type.clone(),
            format_timestamp(&result.timestamp)?,
        ]));
    }

    log::debug!("exported {} AI result rows", rows.len() - 1);
    Ok(rows.join("\n"))
}

/// Download name for an `evaluations` export: `<title>_results.csv`.
pub fn evaluations_file_name(assignment_title: &str) -> String {
    format!("{assignment_title}_results.csv")
}

/// Download name for an AI results export.
///
/// Every character outside `[A-Za-z0-9]` becomes `-` and the result is
/// lowercased: `Essay #1` → `ai-results-essay--1.csv`.
pub fn ai_results_file_name(assignment_title: &str) -> String {
    let slug: String = assignment_title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("ai-results-{slug}.csv")
}

/// Reformat a stored timestamp as `YYYY-MM-DD HH:MM:SS` in its own offset.
///
/// Accepts RFC 3339 and offset-less `YYYY-MM-DD[T ]HH:MM:SS[.frac]`.
pub fn format_timestamp(timestamp: &str) -> Result<String> {
    let timestamp = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(dt.format(DATE_FORMAT).to_string());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .ok_or_else(|| Error::InvalidTimestamp(timestamp.to_string()))
}

fn join_row<I>(fields: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fields
        .into_iter()
        .map(|field| quote_field(&field).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field if it contains a delimiter, quote or line break.
fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
