//! Timetable service implementation
//!
//! Fetches the lecture plan over a date range for all enrolled classes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiEnvelope};
use crate::models::LectureSlot;
use crate::services::AttendanceService;
use crate::state::SessionStore;
use crate::utils::errors::{ClientError, Result};
use crate::utils::logging::log_fetch;

/// Lecture plan request body, matching the vendor's filter contract
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LecturePlanPayload {
    college_ids: Vec<i64>,
    classroom_generated_ids: Vec<i64>,
    date_start_time_from: String,
    date_end_time_to: String,
    fetch_attendance: bool,
    fetch_current_student_attendance: bool,
    filter_param_model: FilterParams,
    for_student: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterParams {
    multi_search: Vec<String>,
    sort_asc: bool,
    sort_field: i32,
}

/// The lecture plan nests its slot list one level deeper than the
/// standard envelope
#[derive(Debug, Clone, Default, Deserialize)]
struct LecturePlanData {
    #[serde(default)]
    data: Vec<LectureSlot>,
}

/// Timetable service
#[derive(Clone)]
pub struct TimetableService {
    api: ApiClient,
    store: SessionStore,
    attendance: AttendanceService,
    college_id: i64,
}

impl TimetableService {
    /// Create a new TimetableService instance
    pub fn new(
        api: ApiClient,
        store: SessionStore,
        attendance: AttendanceService,
        college_id: i64,
    ) -> Self {
        Self {
            api,
            store,
            attendance,
            college_id,
        }
    }

    /// Fetch the lecture plan between the given dates (inclusive)
    pub async fn fetch_timetable(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<LectureSlot>> {
        let mut classes = self.store.classes().await;
        if classes.is_empty() {
            classes = self.attendance.load_class_list().await?;
        }
        if classes.is_empty() {
            return Err(ClientError::InvalidInput(
                "no enrolled classes found".to_string(),
            ));
        }

        let payload = LecturePlanPayload {
            college_ids: vec![self.college_id],
            classroom_generated_ids: classes
                .iter()
                .map(|c| c.classroom_generated_id)
                .collect(),
            date_start_time_from: date_start.format("%Y-%m-%dT00:00:00").to_string(),
            date_end_time_to: date_end.format("%Y-%m-%dT23:59:59").to_string(),
            fetch_attendance: true,
            fetch_current_student_attendance: true,
            filter_param_model: FilterParams {
                multi_search: vec![],
                sort_asc: true,
                sort_field: 6,
            },
            for_student: true,
        };

        let envelope: ApiEnvelope<LecturePlanData> = self
            .api
            .post_json("/api/lecturePlan?getOtherSchedules=true", &payload)
            .await?;
        let slots = envelope.data.map(|d| d.data).unwrap_or_default();
        log_fetch("/api/lecturePlan", slots.len(), 0);
        Ok(slots)
    }
}
