//! SymphonyX student client
//!
//! A client library for the SymphonyX college ERP, built for student
//! apps. It drives the two-phase token session (service token, then a
//! login-confirmed user token), aggregates per-class attendance with
//! target projections, computes the credit-weighted CGPA from semester
//! results, and covers timetable, leave, feedback and admit card
//! operations.

pub mod config;
pub mod http;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ApiError, ClientError, Result};

// Re-export main components for easy access
pub use http::ApiClient;
pub use services::ServiceFactory;
pub use state::{SessionPhase, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
