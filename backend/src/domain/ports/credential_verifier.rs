//! Driving port for resolving caller credentials.
//!
//! Inbound adapters call it to authenticate a request without knowing how
//! principals are stored, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{BasicCredentials, Error, Principal};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    ///
    /// Unknown users and wrong passwords both fail with
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized).
    async fn verify(&self, credentials: &BasicCredentials) -> Result<Principal, Error>;
}
