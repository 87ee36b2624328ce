//! Leave application models

use serde::{Deserialize, Serialize};

/// A leave application as stored on the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    pub sr_no: i64,
    /// 1 = pending, 2 = approved, 3 = rejected
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub from_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, rename = "documentDTO")]
    pub document: Option<LeaveDocument>,
}

/// Supporting document attached to a leave application
///
/// On submission `document_name` carries the temporary name returned by
/// the upload endpoint and `document_url` the original file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDocument {
    #[serde(default)]
    pub document_name: Option<String>,
    #[serde(default)]
    pub document_url: Option<String>,
    /// 1 = add, set when submitting a freshly uploaded document
    #[serde(default)]
    pub document_opr: Option<i32>,
}

/// A new leave application to submit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub reason: String,
    pub description: String,
    /// ISO-8601 timestamps
    pub from_date: String,
    pub end_date: String,
    /// Backend leave category, defaults to "6" (general/medical)
    #[serde(default = "default_leave_type")]
    pub leave_type: String,
    /// Supporting document from a prior upload-to-temp call
    #[serde(default)]
    pub document: Option<LeaveDocument>,
}

fn default_leave_type() -> String {
    "6".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_application_deserialization() {
        let json = r#"{
            "srNo": 17,
            "status": 1,
            "reason": "Medical",
            "fromDate": "2025-03-01T00:00:00Z",
            "endDate": "2025-03-03T00:00:00Z",
            "documentDTO": {"documentName": "note.pdf", "documentUrl": "https://files/note.pdf"}
        }"#;
        let leave: LeaveApplication = serde_json::from_str(json).unwrap();
        assert_eq!(leave.sr_no, 17);
        assert_eq!(leave.status, 1);
        assert!(leave.document.is_some());
    }

    #[test]
    fn test_leave_request_default_type() {
        let json = r#"{
            "reason": "Family function",
            "description": "Travelling home",
            "fromDate": "2025-03-01T00:00:00Z",
            "endDate": "2025-03-02T00:00:00Z"
        }"#;
        let request: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.leave_type, "6");
    }
}
