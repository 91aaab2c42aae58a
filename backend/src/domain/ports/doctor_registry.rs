//! Driven port for stored doctor profiles.

use async_trait::async_trait;

use crate::domain::{Doctor, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by doctor registry adapters.
    pub enum DoctorRegistryError {
        /// Backing store could not be reached.
        Connection { message: String } =>
            "doctor registry connection failed: {message}",
        /// Lookup or mutation failed during execution.
        Query { message: String } =>
            "doctor registry query failed: {message}",
        /// Another doctor already uses this email.
        DuplicateEmail { email: String } =>
            "doctor email already registered: {email}",
    }
}

/// Port for storing and listing doctors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorRegistry: Send + Sync {
    /// Store a new doctor alongside their login hash.
    async fn insert(
        &self,
        doctor: Doctor,
        password_hash: PasswordHash,
    ) -> Result<(), DoctorRegistryError>;

    /// Every stored doctor, oldest first.
    async fn list(&self) -> Result<Vec<Doctor>, DoctorRegistryError>;
}
