//! Exam result models and CGPA derivation
//!
//! The backend reports a per-semester SGPA; the cumulative GPA shown to
//! the student is derived client-side as the credit-weighted mean of
//! SGPA across completed semesters. The derived value is never treated
//! as authoritative.

use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::round2;

/// One semester's exam result set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResult {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sgpa: f64,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub student_result_list: Vec<SubjectResult>,
}

/// Per-subject result row within a semester
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub credit: f64,
    #[serde(default)]
    pub marks_obtained: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub grade: Option<String>,
}

impl SemesterResult {
    /// Sum of subject credits for this semester
    pub fn total_credits(&self) -> f64 {
        self.student_result_list.iter().map(|s| s.credit).sum()
    }
}

/// Credit-weighted mean of SGPA across the given semesters
///
/// Semesters with no data are expected to be filtered out by the caller;
/// a zero total credit load yields 0. Rounded to 2 decimals.
pub fn weighted_cgpa(results: &[SemesterResult]) -> f64 {
    let mut total_quality_points = 0.0;
    let mut total_credits = 0.0;

    for result in results {
        let credits = result.total_credits();
        total_quality_points += result.sgpa * credits;
        total_credits += credits;
    }

    if total_credits == 0.0 {
        0.0
    } else {
        round2(total_quality_points / total_credits)
    }
}

/// Admit card generation outcome: a download URL for the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmitCard {
    pub download_url: String,
}

/// The backend serializes some numeric fields as strings
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => s.trim().parse().unwrap_or(0.0),
    })
}
