//! Leave application service implementation

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Settings;
use crate::http::{ApiClient, ApiEnvelope};
use crate::models::{LeaveApplication, LeaveDocument, LeaveRequest, UserProfile};
use crate::state::SessionStore;
use crate::utils::errors::{ApiError, ClientError, Result};

/// Outcome of a mutating leave operation
#[derive(Debug, Clone, Deserialize)]
pub struct OperationOutcome {
    #[serde(default)]
    pub flag: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        self.flag == Some(1)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchLeavesPayload {
    campus_id: i64,
    college_id: i64,
    inst_id: i64,
    session_id: i64,
    student_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyLeavePayload {
    inst_id: i64,
    campus_id: i64,
    college_id: i64,
    session_id: i64,
    student_id: String,
    applier_id: String,
    /// 1 = leave request
    req_type: i32,
    /// 2 = student
    user_type: i32,
    leave_type: String,
    reason: String,
    description: String,
    from_date: String,
    end_date: String,
    /// The backend expects an explicit null when no document is attached
    #[serde(rename = "documentDTO")]
    document_dto: Option<LeaveDocument>,
}

/// Response body of the upload-to-temp endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TempUploadData {
    #[serde(default)]
    temp_image_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteLeavePayload {
    inst_id: i64,
    campus_id: i64,
    college_id: i64,
    session_id: i64,
    student_id: String,
    sr_no: i64,
    status: i32,
}

/// Leave application service
#[derive(Clone)]
pub struct LeaveService {
    api: ApiClient,
    store: SessionStore,
    settings: Settings,
}

impl LeaveService {
    /// Create a new LeaveService instance
    pub fn new(api: ApiClient, store: SessionStore, settings: Settings) -> Self {
        Self {
            api,
            store,
            settings,
        }
    }

    /// Fetch the student's leave applications
    pub async fn fetch_leaves(&self) -> Result<Vec<LeaveApplication>> {
        let user = self.require_user().await?;
        let payload = FetchLeavesPayload {
            campus_id: self.settings.api.campus_id,
            college_id: user.college_id.unwrap_or(self.settings.api.college_id),
            inst_id: self.settings.api.institute_id,
            session_id: self.session_id(&user).await?,
            student_id: user.user_id,
        };

        let envelope: ApiEnvelope<Vec<LeaveApplication>> = self
            .api
            .post_json("/api/slmStudent/fetchLeaves", &payload)
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Upload a supporting document to temporary storage
    ///
    /// Returns the document descriptor to attach to a [`LeaveRequest`];
    /// the backend moves the file out of temporary storage when the
    /// application referencing it is submitted.
    pub async fn upload_document(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<LeaveDocument> {
        let inst_id = self
            .store
            .user()
            .await
            .and_then(|u| u.institute_id)
            .unwrap_or(self.settings.api.institute_id);
        let path = format!("/api/slmCore/uploadFileToTemp?instId={}", inst_id);

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let envelope: ApiEnvelope<TempUploadData> = self.api.post_multipart(&path, form).await?;
        let temp_name = envelope
            .data
            .and_then(|d| d.temp_image_name)
            .ok_or_else(|| {
                ApiError::InvalidResponse("upload returned no temporary file name".to_string())
            })?;

        info!(file_name = file_name, "Document uploaded to temporary storage");
        Ok(LeaveDocument {
            document_name: Some(temp_name),
            document_url: Some(file_name.to_string()),
            document_opr: Some(1),
        })
    }

    /// Submit a new leave application
    pub async fn apply_leave(&self, request: LeaveRequest) -> Result<OperationOutcome> {
        let user = self.require_user().await?;
        let payload = ApplyLeavePayload {
            inst_id: self.settings.api.institute_id,
            campus_id: self.settings.api.campus_id,
            college_id: user.college_id.unwrap_or(self.settings.api.college_id),
            session_id: self.session_id(&user).await?,
            student_id: user.user_id.clone(),
            applier_id: user.user_id,
            req_type: 1,
            user_type: 2,
            leave_type: request.leave_type,
            reason: request.reason,
            description: request.description,
            from_date: request.from_date,
            end_date: request.end_date,
            document_dto: request.document,
        };

        let outcome: OperationOutcome = self
            .api
            .post_json("/api/slmStudent/applyLeaves", &payload)
            .await?;
        info!(success = outcome.is_success(), "Leave application submitted");
        Ok(outcome)
    }

    /// Delete a leave application by serial number
    pub async fn delete_leave(&self, sr_no: i64, status: i32) -> Result<OperationOutcome> {
        let user = self.require_user().await?;
        let payload = DeleteLeavePayload {
            inst_id: self.settings.api.institute_id,
            campus_id: self.settings.api.campus_id,
            college_id: user.college_id.unwrap_or(self.settings.api.college_id),
            session_id: self.session_id(&user).await?,
            student_id: user.user_id,
            sr_no,
            status,
        };

        let outcome: OperationOutcome = self
            .api
            .post_json("/api/slmStudent/deleteLeaves", &payload)
            .await?;
        info!(sr_no = sr_no, success = outcome.is_success(), "Leave deleted");
        Ok(outcome)
    }

    async fn require_user(&self) -> Result<UserProfile> {
        self.store.user().await.ok_or(ClientError::MissingProfile)
    }

    async fn session_id(&self, user: &UserProfile) -> Result<i64> {
        if let Some(session_id) = user.session_id {
            return Ok(session_id);
        }
        self.store
            .academic_session()
            .await
            .and_then(|s| s.session_id)
            .ok_or_else(|| ClientError::InvalidInput("missing session id".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_payload_serialization() {
        let payload = ApplyLeavePayload {
            inst_id: 1,
            campus_id: 3,
            college_id: 3,
            session_id: 2511,
            student_id: "223/146".to_string(),
            applier_id: "223/146".to_string(),
            req_type: 1,
            user_type: 2,
            leave_type: "6".to_string(),
            reason: "Medical".to_string(),
            description: "Fever".to_string(),
            from_date: "2025-03-01T00:00:00Z".to_string(),
            end_date: "2025-03-02T00:00:00Z".to_string(),
            document_dto: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["reqType"], 1);
        assert_eq!(json["userType"], 2);
        assert_eq!(json["applierId"], "223/146");
        // Without an attachment the backend still expects the key.
        assert_eq!(json["documentDTO"], serde_json::Value::Null);
    }

    #[test]
    fn test_apply_payload_with_document_serialization() {
        let payload = ApplyLeavePayload {
            inst_id: 1,
            campus_id: 3,
            college_id: 3,
            session_id: 2511,
            student_id: "223/146".to_string(),
            applier_id: "223/146".to_string(),
            req_type: 1,
            user_type: 2,
            leave_type: "6".to_string(),
            reason: "Medical".to_string(),
            description: "Fever".to_string(),
            from_date: "2025-03-01T00:00:00Z".to_string(),
            end_date: "2025-03-02T00:00:00Z".to_string(),
            document_dto: Some(LeaveDocument {
                document_name: Some("tmp_8f3a.pdf".to_string()),
                document_url: Some("note.pdf".to_string()),
                document_opr: Some(1),
            }),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["documentDTO"]["documentName"], "tmp_8f3a.pdf");
        assert_eq!(json["documentDTO"]["documentUrl"], "note.pdf");
        assert_eq!(json["documentDTO"]["documentOpr"], 1);
    }

    #[test]
    fn test_operation_outcome() {
        let ok: OperationOutcome = serde_json::from_str(r#"{"flag": 1}"#).unwrap();
        assert!(ok.is_success());
        let failed: OperationOutcome =
            serde_json::from_str(r#"{"flag": 0, "message": "Overlapping leave"}"#).unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.message.as_deref(), Some("Overlapping leave"));
    }
}
