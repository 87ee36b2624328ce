//! Student profile and academic session models

use serde::{Deserialize, Serialize};

/// Authenticated student profile, as returned by the dashboard endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub college_id: Option<i64>,
    #[serde(default)]
    pub institute_id: Option<i64>,
    /// Current semester number of the student
    #[serde(default)]
    pub current_stage: Option<u32>,
    #[serde(default)]
    pub session_id: Option<i64>,
}

/// Academic session descriptor attached to the dashboard response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSession {
    #[serde(default)]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub academic_session_id: Option<i64>,
    #[serde(default)]
    pub year: Option<String>,
}
