//! Course feedback models
//!
//! Feedback forms arrive as a set of sections, each holding questions
//! with selectable options.

use serde::{Deserialize, Serialize};

/// A course eligible for feedback, with its assigned faculty
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCourse {
    pub course_id: String,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub faculty_id: Option<String>,
    #[serde(default)]
    pub faculty_name: Option<String>,
    #[serde(default)]
    pub course_type: i32,
    /// Non-zero once feedback has been submitted
    #[serde(default)]
    pub feedback_filled: Option<i32>,
    #[serde(default)]
    pub status: i32,
}

/// A feedback form: the question set for one course/faculty assignment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSet {
    #[serde(default)]
    pub set_id: Option<i64>,
    #[serde(default)]
    pub set_description: Option<String>,
    #[serde(default, rename = "sectionDTOList")]
    pub sections: Vec<FeedbackSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSection {
    pub section_id: i64,
    #[serde(default)]
    pub section_name: Option<String>,
    #[serde(default, rename = "questionList")]
    pub questions: Vec<FeedbackQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuestion {
    pub question_id: i64,
    #[serde(default)]
    pub question_desc: Option<String>,
    #[serde(default)]
    pub mandatory: Option<i32>,
    #[serde(default, rename = "optionDTOList")]
    pub options: Vec<FeedbackOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackOption {
    pub option_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub point_score: Option<f64>,
    /// Set to 1 on the chosen option when submitting
    #[serde(default)]
    pub option_choosen: Option<i32>,
}
