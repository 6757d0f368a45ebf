//! Summary statistics over graded records.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Scored;

/// Aggregate figures shown at the top of the results dialogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultStats {
    pub total: usize,
    /// Mean percentage.
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    /// Number of records per grade, ordered by grade.
    pub grade_distribution: BTreeMap<String, usize>,
}

impl ResultStats {
    /// Compute statistics. An empty slice yields all zeros.
    pub fn compute<T: Scored>(records: &[T]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut sum = 0.0;
        let mut highest = f64::NEG_INFINITY;
        let mut lowest = f64::INFINITY;
        let mut grade_distribution = BTreeMap::new();

        for record in records {
            let percentage = record.percentage();
            sum += percentage;
            highest = highest.max(percentage);
            lowest = lowest.min(percentage);
            *grade_distribution
                .entry(record.grade().to_string())
                .or_insert(0) += 1;
        }

        Self {
            total: records.len(),
            average: sum / records.len() as f64,
            highest,
            lowest,
            grade_distribution,
        }
    }

    /// Average rounded to the nearest whole percent.
    pub fn rounded_average(&self) -> f64 {
        self.average.round()
    }
}

/// Coarse performance band for a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PerformanceBand {
    Excellent,
    Good,
    Satisfactory,
    NeedsImprovement,
    Failing,
}

impl PerformanceBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            PerformanceBand::Excellent
        } else if percentage >= 80.0 {
            PerformanceBand::Good
        } else if percentage >= 70.0 {
            PerformanceBand::Satisfactory
        } else if percentage >= 60.0 {
            PerformanceBand::NeedsImprovement
        } else {
            PerformanceBand::Failing
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "excellent",
            PerformanceBand::Good => "good",
            PerformanceBand::Satisfactory => "satisfactory",
            PerformanceBand::NeedsImprovement => "needs improvement",
            PerformanceBand::Failing => "failing",
        }
    }
}
