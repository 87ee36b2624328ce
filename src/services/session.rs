//! Session service implementation
//!
//! This service drives the two-phase token bootstrap: an anonymous
//! service token fetched at startup, then a user token obtained by login
//! and confirmed by a dashboard fetch. It also handles the saved
//! credential auto-login flow and logout.
//!
//! The service is not designed for concurrent login attempts on the same
//! session; callers must serialize logins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::http::{header_token, ApiClient, ApiEnvelope};
use crate::models::{AcademicSession, UserProfile};
use crate::state::{CredentialStore, SavedCredentials, SessionStore};
use crate::utils::errors::{ApiError, ClientError, Result};
use crate::utils::logging::log_auth_event;

/// Response body of the service bootstrap call
#[derive(Debug, Clone, Deserialize)]
struct BootstrapResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload<'a> {
    institute_id: i64,
    campus_id: i64,
    login_id: &'a str,
    password: &'a str,
}

/// Login response body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub flag: Option<i32>,
    #[serde(default)]
    pub message: Vec<String>,
}

impl LoginResponse {
    /// The backend signals rejection with either `status: false` or
    /// `flag: 0`
    pub fn is_rejected(&self) -> bool {
        self.status == Some(false) || self.flag == Some(0)
    }

    /// First server-supplied message, or a generic fallback
    pub fn rejection_message(&self) -> String {
        self.message
            .first()
            .cloned()
            .unwrap_or_else(|| "Invalid credentials".to_string())
    }
}

/// Dashboard response payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardData {
    #[serde(default)]
    user_model: Option<UserProfile>,
    #[serde(default)]
    academic_session_models: Vec<AcademicSession>,
}

/// Session service owning the token lifecycle
#[derive(Clone)]
pub struct SessionService {
    api: ApiClient,
    store: SessionStore,
    credentials: Arc<dyn CredentialStore>,
    settings: Settings,
}

impl SessionService {
    /// Create a new SessionService instance
    pub fn new(
        api: ApiClient,
        store: SessionStore,
        credentials: Arc<dyn CredentialStore>,
        settings: Settings,
    ) -> Self {
        Self {
            api,
            store,
            credentials,
            settings,
        }
    }

    /// Fetch the anonymous service token issued before login
    ///
    /// Failure is logged and swallowed: the client stays unauthenticated
    /// and later calls will fail with auth errors until a login succeeds.
    pub async fn bootstrap(&self) {
        match self.try_bootstrap().await {
            Ok(true) => info!("Service token acquired"),
            Ok(false) => warn!("No token found in service bootstrap response"),
            Err(e) => warn!(error = %e, "Service token bootstrap failed"),
        }
    }

    async fn try_bootstrap(&self) -> Result<bool> {
        let response = self.api.get("/api/slmCore/getServiceUrls").await?;
        let from_header = header_token(&response);
        let body: BootstrapResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        match from_header.or(body.token) {
            Some(token) => {
                self.store.set_service_token(token).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Log in with the given credentials
    ///
    /// A login only counts as successful once the follow-up dashboard
    /// fetch confirms the token with a user profile. With `silent` set
    /// (stored-credential auto-login) failures are swallowed and `None`
    /// is returned instead of an error.
    pub async fn login(
        &self,
        login_id: &str,
        password: &str,
        silent: bool,
    ) -> Result<Option<UserProfile>> {
        self.store.begin_authentication().await;

        match self.try_login(login_id, password).await {
            Ok(profile) => {
                log_auth_event(login_id, true, silent);
                Ok(Some(profile))
            }
            Err(e) => {
                self.store.fail_login().await;
                log_auth_event(login_id, false, silent);
                if silent {
                    debug!(error = %e, "Silent login failed, staying at login prompt");
                    Ok(None)
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn try_login(&self, login_id: &str, password: &str) -> Result<UserProfile> {
        let payload = LoginPayload {
            institute_id: self.settings.api.institute_id,
            campus_id: self.settings.api.campus_id,
            login_id,
            password,
        };

        let response = self.api.post("/login/verify/password", &payload).await?;
        let from_header = header_token(&response);
        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if body.is_rejected() {
            return Err(ClientError::Authentication(body.rejection_message()));
        }

        let token = from_header.or(body.token).ok_or_else(|| {
            ClientError::Authentication("Invalid response from server".to_string())
        })?;
        self.store.set_user_token(token).await;

        // The token is not trusted until a profile fetch confirms it.
        match self.fetch_dashboard().await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                debug!(error = %e, "Dashboard fetch after login failed");
                Err(ClientError::Authentication(
                    "Server is not responding. Please try again later.".to_string(),
                ))
            }
        }
    }

    /// Fetch the dashboard and install the confirmed profile
    pub async fn fetch_dashboard(&self) -> Result<UserProfile> {
        if self.store.active_token().await.is_none() {
            return Err(ClientError::MissingToken);
        }

        let path = format!("/api/dashboard?campusId={}", self.settings.api.campus_id);
        let envelope: ApiEnvelope<DashboardData> = self.api.get_json(&path).await?;
        let data = envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("dashboard payload missing".to_string()))?;

        let academic_session = data.academic_session_models.into_iter().next();
        let user = data.user_model.ok_or(ClientError::MissingProfile)?;

        self.store
            .complete_login(user.clone(), academic_session)
            .await;
        Ok(user)
    }

    /// Attempt a silent login with stored credentials, if any
    pub async fn auto_login(&self) -> Result<Option<UserProfile>> {
        let saved = match self.credentials.load().await {
            Ok(Some(saved)) => saved,
            Ok(None) => return Ok(None),
            Err(e) => {
                debug!(error = %e, "Could not read saved credentials");
                return Ok(None);
            }
        };

        self.login(&saved.login_id, &saved.password, true).await
    }

    /// Persist credentials for future auto-login
    pub async fn remember(&self, login_id: &str, password: &str) -> Result<()> {
        self.credentials
            .save(&SavedCredentials {
                login_id: login_id.to_string(),
                password: password.to_string(),
            })
            .await
    }

    /// Drop any persisted credentials
    pub async fn forget(&self) -> Result<()> {
        self.credentials.clear().await
    }

    /// Log out: clear the user session and all derived data
    pub async fn logout(&self, clear_saved: bool) -> Result<()> {
        self.store.clear_auth().await;
        if clear_saved {
            self.credentials.clear().await?;
        }
        info!("Logged out");
        Ok(())
    }
}
