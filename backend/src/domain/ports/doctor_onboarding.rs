//! Driving port for administrator doctor onboarding and the public listing.

use async_trait::async_trait;

use crate::domain::{
    BearerToken, Doctor, DoctorDraft, DoctorId, Error, IssuedToken, LoginCredentials,
};

/// Domain use-case port for doctor management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorOnboarding: Send + Sync {
    /// Check the configured administrator credentials.
    async fn admin_login(&self, credentials: LoginCredentials) -> Result<IssuedToken, Error>;

    /// Add a doctor on behalf of an administrator.
    async fn add_doctor(
        &self,
        credential: Option<BearerToken>,
        draft: DoctorDraft,
        password: String,
    ) -> Result<DoctorId, Error>;

    /// Every doctor visible to patients.
    async fn list_doctors(&self) -> Result<Vec<Doctor>, Error>;
}
