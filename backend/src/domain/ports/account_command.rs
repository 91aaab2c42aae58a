//! Driving port for patient account use-cases.
//!
//! Handlers call this port to sign patients up, log them in, and record the
//! caregiver number the emergency alert is sent to.

use async_trait::async_trait;

use crate::domain::{
    BearerToken, Error, IssuedToken, LoginCredentials, PhoneNumber, Registration, User, UserId,
};

/// Credential handed back after sign-up or login.
#[derive(Debug, Clone)]
pub struct AccountSession {
    /// Authenticated patient.
    pub user_id: UserId,
    /// Bearer credential for later requests.
    pub token: IssuedToken,
}

/// Domain use-case port for patient accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and return a session for it.
    async fn register(&self, registration: Registration) -> Result<AccountSession, Error>;

    /// Check credentials and return a session.
    ///
    /// Unknown emails and wrong passwords fail identically.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccountSession, Error>;

    /// Record the caregiver number for the calling patient.
    async fn set_doctor_phone(
        &self,
        credential: Option<BearerToken>,
        phone: PhoneNumber,
    ) -> Result<User, Error>;
}
