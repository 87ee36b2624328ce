//! Timetable models

use serde::{Deserialize, Serialize};

/// One scheduled lecture slot from the lecture-plan endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureSlot {
    #[serde(default)]
    pub classroom_generated_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    /// Weekday indicator as reported by the backend (1 = Monday)
    #[serde(default)]
    pub weekday_ind: Option<i32>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub faculty_name: Option<String>,
    #[serde(default)]
    pub room_no: Option<String>,
}
