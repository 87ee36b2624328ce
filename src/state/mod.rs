//! Session and credential state management

pub mod credentials;
pub mod session;

pub use credentials::{
    credential_store_from_config, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    SavedCredentials,
};
pub use session::{SessionPhase, SessionStore};
