//! Course feedback service implementation
//!
//! Lists the courses open for feedback, fetches the question set for a
//! course/faculty assignment, and submits filled feedback.

use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::http::{ApiClient, ApiEnvelope};
use crate::models::{FeedbackCourse, FeedbackSet, UserProfile};
use crate::services::leave::OperationOutcome;
use crate::state::SessionStore;
use crate::utils::errors::{ClientError, Result};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseDetailsPayload {
    academic_year: Option<String>,
    assignment_type: i32,
    campus_id: i64,
    college_id: i64,
    inst_id: i64,
    semester: i32,
    student_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct StudentFeedbackPayload {
    academic_year: Option<String>,
    assignment_type: i32,
    campus_id: i64,
    college_id: i64,
    course_id: Option<String>,
    faculty_id: Option<String>,
    inst_id: i64,
    semester: i32,
    student_id: String,
}

/// A filled feedback form ready for submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    pub inst_id: i64,
    pub campus_id: i64,
    pub college_id: i64,
    pub academic_year: Option<String>,
    pub student_id: String,
    pub course_id: Option<String>,
    pub faculty_id: Option<String>,
    #[serde(rename = "setDTO")]
    pub set: FeedbackSet,
    pub feedback_filled: i32,
}

/// Course feedback service
#[derive(Clone)]
pub struct FeedbackService {
    api: ApiClient,
    store: SessionStore,
    settings: Settings,
}

impl FeedbackService {
    /// Create a new FeedbackService instance
    pub fn new(api: ApiClient, store: SessionStore, settings: Settings) -> Self {
        Self {
            api,
            store,
            settings,
        }
    }

    /// List courses eligible for feedback this semester
    pub async fn course_details(&self) -> Result<Vec<FeedbackCourse>> {
        let user = self.require_user().await?;
        let payload = CourseDetailsPayload {
            academic_year: self.academic_year().await,
            assignment_type: 0,
            campus_id: self.settings.api.campus_id,
            college_id: user.college_id.unwrap_or(self.settings.api.college_id),
            inst_id: self.settings.api.institute_id,
            semester: 1,
            student_id: user.user_id,
        };

        let envelope: ApiEnvelope<Vec<FeedbackCourse>> = self
            .api
            .post_json("/api/slmFeedback/getStuCourseDtls", &payload)
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Fetch the feedback question set for one course/faculty assignment
    pub async fn student_feedback(
        &self,
        assignment_type: i32,
        course_id: Option<&str>,
        faculty_id: Option<&str>,
    ) -> Result<Option<FeedbackSet>> {
        let user = self.require_user().await?;
        let payload = StudentFeedbackPayload {
            academic_year: self.academic_year().await,
            assignment_type,
            campus_id: self.settings.api.campus_id,
            college_id: user.college_id.unwrap_or(self.settings.api.college_id),
            course_id: course_id.map(str::to_string),
            faculty_id: faculty_id.map(str::to_string),
            inst_id: self.settings.api.institute_id,
            semester: 1,
            student_id: user.user_id,
        };

        let envelope: ApiEnvelope<FeedbackSet> = self
            .api
            .post_json("/api/slmFeedback/getStuFdbck", &payload)
            .await?;
        Ok(envelope.data)
    }

    /// Submit a filled feedback form
    pub async fn save_feedback(&self, submission: &FeedbackSubmission) -> Result<OperationOutcome> {
        let outcome: OperationOutcome = self
            .api
            .post_json("/api/slmFeedback/saveStuFdbck", submission)
            .await?;
        info!(
            course_id = submission.course_id.as_deref(),
            success = outcome.is_success(),
            "Feedback submitted"
        );
        Ok(outcome)
    }

    async fn require_user(&self) -> Result<UserProfile> {
        self.store.user().await.ok_or(ClientError::MissingProfile)
    }

    async fn academic_year(&self) -> Option<String> {
        self.store.academic_session().await.and_then(|s| s.year)
    }
}
