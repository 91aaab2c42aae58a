//! Driven port for the patient directory.
//!
//! The directory owns patient records. The emergency path only reads from it;
//! registration and the caregiver update are the sole writers.

use async_trait::async_trait;

use crate::domain::{EmailAddress, PasswordHash, PhoneNumber, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Backing store could not be reached.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Lookup or mutation failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
        /// Another record already uses this email.
        DuplicateEmail { email: String } =>
            "email already registered: {email}",
        /// No record exists for the identifier.
        UnknownUser { user_id: String } =>
            "user not found: {user_id}",
    }
}

/// Stored patient record: profile plus credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Public profile.
    pub user: User,
    /// Encoded password hash used at login.
    pub password_hash: PasswordHash,
}

/// Port for reading and writing patient records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserDirectoryError>;

    /// Fetch a record by login email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserDirectoryError>;

    /// Store a new record, rejecting duplicate emails.
    async fn insert(&self, record: UserRecord) -> Result<(), UserDirectoryError>;

    /// Replace the caregiver number on an existing record and return the
    /// updated profile.
    async fn set_caregiver_phone(
        &self,
        id: &UserId,
        phone: PhoneNumber,
    ) -> Result<User, UserDirectoryError>;
}
