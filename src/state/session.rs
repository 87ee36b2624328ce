//! Session state management
//!
//! The session store is the single source of truth for the request
//! authorization token and everything derived from a login: the student
//! profile, enrolled classes, attendance working set and CGPA. It is an
//! explicit context object passed to the services that need it; there is
//! no ambient global.
//!
//! A generation counter guards derived data against stale writes: a load
//! captures the generation when it starts and its commit is discarded if
//! the store has been reset in the meantime, so an in-flight refresh can
//! never resurrect cleared state.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::{AcademicSession, AttendanceRecord, ClassEnrollment, UserProfile};

/// Phase of the two-step token lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No token held
    Unauthenticated,
    /// Holding the anonymous service token from the bootstrap call
    ServiceBootstrapped,
    /// A login attempt is in flight
    Authenticating,
    /// Holding a confirmed user token and profile
    Authenticated,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Unauthenticated => "unauthenticated",
            SessionPhase::ServiceBootstrapped => "service-bootstrapped",
            SessionPhase::Authenticating => "authenticating",
            SessionPhase::Authenticated => "authenticated",
        };
        write!(f, "{}", name)
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Unauthenticated
    }
}

#[derive(Debug, Default)]
struct SessionData {
    service_token: Option<String>,
    user_token: Option<String>,
    user: Option<UserProfile>,
    academic_session: Option<AcademicSession>,
    classes: Vec<ClassEnrollment>,
    attendance: Vec<AttendanceRecord>,
    cgpa: Option<f64>,
    phase: SessionPhase,
}

/// Shared session context
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    data: Arc<RwLock<SessionData>>,
    generation: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.data.read().await.phase
    }

    async fn transition(&self, to: SessionPhase) {
        let mut data = self.data.write().await;
        let from = data.phase;
        if from != to {
            info!(from = %from, to = %to, "Session phase transition");
        }
        data.phase = to;
    }

    /// The token used for outgoing requests: the user token once a login
    /// has been confirmed, the service token before that
    pub async fn active_token(&self) -> Option<String> {
        let data = self.data.read().await;
        data.user_token
            .clone()
            .or_else(|| data.service_token.clone())
    }

    /// Store the anonymous bootstrap token
    pub async fn set_service_token(&self, token: String) {
        {
            let mut data = self.data.write().await;
            data.service_token = Some(token);
        }
        if self.phase().await == SessionPhase::Unauthenticated {
            self.transition(SessionPhase::ServiceBootstrapped).await;
        }
    }

    /// Mark a login attempt as in flight
    pub async fn begin_authentication(&self) {
        self.transition(SessionPhase::Authenticating).await;
    }

    /// Store the user token returned by the login call
    ///
    /// The token is not considered confirmed until [`complete_login`]
    /// runs with the fetched profile.
    ///
    /// [`complete_login`]: SessionStore::complete_login
    pub async fn set_user_token(&self, token: String) {
        let mut data = self.data.write().await;
        data.user_token = Some(token);
    }

    /// Confirm a login: profile fetched, session fully established
    pub async fn complete_login(
        &self,
        user: UserProfile,
        academic_session: Option<AcademicSession>,
    ) {
        {
            let mut data = self.data.write().await;
            data.user = Some(user);
            data.academic_session = academic_session;
        }
        self.transition(SessionPhase::Authenticated).await;
    }

    /// Roll back a failed login attempt
    ///
    /// Drops the unconfirmed user token; a previously obtained service
    /// token is kept so later attempts can still reach the backend.
    pub async fn fail_login(&self) {
        let has_service_token;
        {
            let mut data = self.data.write().await;
            data.user_token = None;
            data.user = None;
            has_service_token = data.service_token.is_some();
        }
        if has_service_token {
            self.transition(SessionPhase::ServiceBootstrapped).await;
        } else {
            self.transition(SessionPhase::Unauthenticated).await;
        }
    }

    /// Clear the user session and everything derived from it
    pub async fn clear_auth(&self) {
        self.invalidate();
        {
            let mut data = self.data.write().await;
            data.user_token = None;
            data.user = None;
            data.academic_session = None;
            data.classes.clear();
            data.attendance.clear();
            data.cgpa = None;
        }
        self.transition(SessionPhase::Unauthenticated).await;
    }

    pub async fn user(&self) -> Option<UserProfile> {
        self.data.read().await.user.clone()
    }

    pub async fn academic_session(&self) -> Option<AcademicSession> {
        self.data.read().await.academic_session.clone()
    }

    pub async fn classes(&self) -> Vec<ClassEnrollment> {
        self.data.read().await.classes.clone()
    }

    pub async fn set_classes(&self, classes: Vec<ClassEnrollment>) {
        self.data.write().await.classes = classes;
    }

    pub async fn attendance(&self) -> Vec<AttendanceRecord> {
        self.data.read().await.attendance.clone()
    }

    pub async fn cgpa(&self) -> Option<f64> {
        self.data.read().await.cgpa
    }

    /// Current load generation; captured at the start of a load
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidate in-flight loads, e.g. on an explicit clear or refresh
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Drop the attendance working set and invalidate in-flight loads
    pub async fn clear_attendance(&self) {
        self.invalidate();
        self.data.write().await.attendance.clear();
    }

    /// Commit an attendance working set if it is still the latest load
    pub async fn commit_attendance(
        &self,
        generation: u64,
        records: Vec<AttendanceRecord>,
    ) -> bool {
        if generation != self.generation() {
            debug!(
                generation = generation,
                current = self.generation(),
                "Discarding stale attendance load"
            );
            return false;
        }
        self.data.write().await.attendance = records;
        true
    }

    /// Commit a derived CGPA value if it is still the latest computation
    pub async fn commit_cgpa(&self, generation: u64, cgpa: f64) -> bool {
        if generation != self.generation() {
            debug!(
                generation = generation,
                current = self.generation(),
                "Discarding stale CGPA computation"
            );
            return false;
        }
        self.data.write().await.cgpa = Some(cgpa);
        true
    }
}
