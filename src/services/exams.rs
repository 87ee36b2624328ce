//! Exam result service implementation
//!
//! Fetches per-semester results on demand, derives the credit-weighted
//! CGPA across completed semesters, and generates admit cards.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Settings;
use crate::http::{ApiClient, ApiEnvelope};
use crate::models::{weighted_cgpa, AdmitCard, SemesterResult, UserProfile};
use crate::state::SessionStore;
use crate::utils::errors::{ClientError, Result};

/// Exam result request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultPayload {
    institute_id: i64,
    campus_id: i64,
    semester: String,
    selected_stu_ids: Vec<String>,
    /// 2 = student
    user_type: i32,
    session_id: String,
}

/// Admit card response body
#[derive(Debug, Clone, Deserialize)]
struct AdmitCardResponse {
    #[serde(default)]
    flag: Option<i32>,
    #[serde(default)]
    data: Option<String>,
}

/// Exam result and CGPA service
#[derive(Clone)]
pub struct ExamService {
    api: ApiClient,
    store: SessionStore,
    settings: Settings,
}

impl ExamService {
    /// Create a new ExamService instance
    pub fn new(api: ApiClient, store: SessionStore, settings: Settings) -> Self {
        Self {
            api,
            store,
            settings,
        }
    }

    /// Fetch one semester's result set
    ///
    /// `Ok(None)` means the backend has no result for that semester,
    /// which callers treat as "no result data found" rather than an
    /// error.
    pub async fn fetch_semester_result(&self, semester: u32) -> Result<Option<SemesterResult>> {
        let user = self.require_user().await?;
        let session_id = self.result_session_id().await?;

        let payload = ResultPayload {
            institute_id: self.settings.api.institute_id,
            campus_id: self.settings.api.campus_id,
            semester: semester.to_string(),
            selected_stu_ids: vec![user.user_id.clone()],
            user_type: 2,
            session_id,
        };

        let envelope: ApiEnvelope<SemesterResult> = self
            .api
            .post_json("/api/slmResult/student/getStudentResult", &payload)
            .await?;
        Ok(envelope.data)
    }

    /// Compute the CGPA across all semesters up to the current stage
    ///
    /// Semesters are fetched sequentially to bound load on the backend.
    /// A semester with no data is skipped; any other failure aborts the
    /// whole computation. The result replaces the stored value unless a
    /// reset superseded this computation.
    pub async fn compute_cgpa(&self) -> Result<f64> {
        let user = self.require_user().await?;
        let current_stage = user.current_stage.unwrap_or(1);
        let generation = self.store.generation();

        let mut results = Vec::new();
        for semester in 1..=current_stage {
            match self.fetch_semester_result(semester).await? {
                Some(result) => results.push(result),
                None => {
                    debug!(semester = semester, "No result data for semester, skipping");
                }
            }
        }

        let cgpa = weighted_cgpa(&results);
        info!(
            cgpa = cgpa,
            semesters = results.len(),
            "CGPA computed"
        );

        if !self.store.commit_cgpa(generation, cgpa).await {
            debug!("CGPA computation superseded by a newer reset");
        }

        Ok(cgpa)
    }

    /// Generate an admit card download link, if one is available
    pub async fn generate_admit_card(&self) -> Result<Option<AdmitCard>> {
        let user = self.require_user().await?;
        let college_id = user.college_id.unwrap_or(self.settings.api.college_id);

        let path = format!(
            "/api/slmExamSchedule/generateAdmitCard?instId={}&studentId={}&collegeId={}&campusId={}",
            self.settings.api.institute_id,
            urlencoding::encode(&user.user_id),
            college_id,
            self.settings.api.campus_id,
        );

        let response: AdmitCardResponse =
            self.api.post_json(&path, &serde_json::json!({})).await?;

        if response.flag == Some(0) {
            return Ok(None);
        }
        Ok(response.data.map(|download_url| AdmitCard { download_url }))
    }

    async fn require_user(&self) -> Result<UserProfile> {
        self.store.user().await.ok_or(ClientError::MissingProfile)
    }

    /// Result queries address the prior session id
    async fn result_session_id(&self) -> Result<String> {
        let session = self
            .store
            .academic_session()
            .await
            .and_then(|s| s.session_id)
            .ok_or_else(|| {
                ClientError::InvalidInput("missing academic session id".to_string())
            })?;
        Ok((session - 1).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_payload_serialization() {
        let payload = ResultPayload {
            institute_id: 1,
            campus_id: 3,
            semester: "5".to_string(),
            selected_stu_ids: vec!["223/146".to_string()],
            user_type: 2,
            session_id: "2510".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["semester"], "5");
        assert_eq!(json["userType"], 2);
        assert_eq!(json["selectedStuIds"][0], "223/146");
    }

    #[test]
    fn test_admit_card_response_no_card() {
        let response: AdmitCardResponse =
            serde_json::from_str(r#"{"flag": 0, "data": null}"#).unwrap();
        assert_eq!(response.flag, Some(0));
        assert!(response.data.is_none());
    }
}
