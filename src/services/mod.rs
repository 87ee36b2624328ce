//! Services module
//!
//! This module contains the business logic services built on top of the
//! shared HTTP client and session store.

pub mod attendance;
pub mod exams;
pub mod feedback;
pub mod leave;
pub mod session;
pub mod timetable;

// Re-export commonly used services
pub use attendance::{dedup_records, filter_noise, AttendanceService};
pub use exams::ExamService;
pub use feedback::{FeedbackService, FeedbackSubmission};
pub use leave::{LeaveService, OperationOutcome};
pub use session::SessionService;
pub use timetable::TimetableService;

use std::sync::Arc;

use crate::config::Settings;
use crate::http::ApiClient;
use crate::state::{credential_store_from_config, CredentialStore, SessionStore};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub session_store: SessionStore,
    pub api: ApiClient,
    pub session_service: SessionService,
    pub attendance_service: AttendanceService,
    pub exam_service: ExamService,
    pub timetable_service: TimetableService,
    pub leave_service: LeaveService,
    pub feedback_service: FeedbackService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        let credentials = credential_store_from_config(&settings.credentials);
        Self::with_credential_store(settings, credentials)
    }

    /// Create a factory with an explicit credential store, e.g. the
    /// application shell's secure storage
    pub fn with_credential_store(
        settings: Settings,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let session_store = SessionStore::new();
        let api = ApiClient::new(&settings.api, session_store.clone())?;

        let session_service = SessionService::new(
            api.clone(),
            session_store.clone(),
            credentials,
            settings.clone(),
        );
        let attendance_service = AttendanceService::new(api.clone(), session_store.clone());
        let exam_service = ExamService::new(api.clone(), session_store.clone(), settings.clone());
        let timetable_service = TimetableService::new(
            api.clone(),
            session_store.clone(),
            attendance_service.clone(),
            settings.api.college_id,
        );
        let leave_service = LeaveService::new(api.clone(), session_store.clone(), settings.clone());
        let feedback_service = FeedbackService::new(api.clone(), session_store.clone(), settings);

        Ok(Self {
            session_store,
            api,
            session_service,
            attendance_service,
            exam_service,
            timetable_service,
            leave_service,
            feedback_service,
        })
    }
}
