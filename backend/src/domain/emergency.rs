//! Emergency alert use-case.
//!
//! A patient presses the emergency control; the service resolves the caller,
//! looks up the caregiver number on file, and hands one text message to the
//! notification gateway. Every call is an independent send: repeated presses
//! produce repeated alerts and nothing is deduplicated or retried.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::authenticator::{AccessDenied, Authenticator};
use super::ports::{
    DispatchReceipt, EmergencyAlertCommand, NotificationSendError, NotificationSender,
    SmsMessage, UserDirectory, UserDirectoryError,
};
use super::{BearerToken, DisplayName, Error, PhoneNumber, Principal, Role};

/// Message returned when the caller has no caregiver number on file.
pub const CAREGIVER_NOT_FOUND_MESSAGE: &str = "Doctor phone number not found";
/// Message returned when the gateway refuses or fails the send.
pub const GATEWAY_FAILURE_MESSAGE: &str = "Failed to send alert";

/// Ephemeral alert composed per request and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyAlert {
    destination: PhoneNumber,
    body: String,
}

impl EmergencyAlert {
    /// Compose the fixed-format alert for `patient`.
    ///
    /// # Examples
    /// ```
    /// use prescripto_backend::domain::{DisplayName, EmergencyAlert, PhoneNumber};
    ///
    /// let alert = EmergencyAlert::compose(
    ///     &DisplayName::new("Asha").unwrap(),
    ///     PhoneNumber::parse("+15551234567").unwrap(),
    /// );
    /// assert_eq!(alert.body(), "🚨 Emergency Alert: Patient Asha needs assistance.");
    /// ```
    pub fn compose(patient: &DisplayName, destination: PhoneNumber) -> Self {
        Self {
            destination,
            body: format!("🚨 Emergency Alert: Patient {patient} needs assistance."),
        }
    }

    pub fn destination(&self) -> &PhoneNumber {
        &self.destination
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl From<EmergencyAlert> for SmsMessage {
    fn from(value: EmergencyAlert) -> Self {
        Self {
            to: value.destination,
            body: value.body,
        }
    }
}

/// Failure modes of [`EmergencyAlertCommand::send_emergency_alert`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmergencyAlertError {
    /// Missing or invalid credential, or one for an unknown identity.
    #[error("{message}")]
    Unauthorized { message: String },
    /// Verified credential that is not a patient's.
    #[error("{message}")]
    Forbidden { message: String },
    /// No caregiver number on the caller's record.
    #[error("Doctor phone number not found")]
    NotFound,
    /// The gateway rejected or failed the send.
    #[error("Failed to send alert")]
    GatewayFailure(#[source] NotificationSendError),
    /// Unexpected fault, such as the directory being unreachable.
    #[error("{message}")]
    Internal { message: String },
}

impl From<AccessDenied> for EmergencyAlertError {
    fn from(value: AccessDenied) -> Self {
        match value {
            AccessDenied::Unauthenticated(message) => Self::Unauthorized {
                message: message.to_owned(),
            },
            AccessDenied::WrongRole(message) => Self::Forbidden {
                message: message.to_owned(),
            },
        }
    }
}

impl From<EmergencyAlertError> for Error {
    fn from(value: EmergencyAlertError) -> Self {
        match value {
            EmergencyAlertError::Unauthorized { message } => Error::unauthorized(message),
            EmergencyAlertError::Forbidden { message } => Error::forbidden(message),
            EmergencyAlertError::NotFound => Error::not_found(CAREGIVER_NOT_FOUND_MESSAGE),
            EmergencyAlertError::GatewayFailure(_) => {
                Error::gateway_failure(GATEWAY_FAILURE_MESSAGE)
            }
            EmergencyAlertError::Internal { message } => Error::internal(message),
        }
    }
}

fn map_directory_error(error: UserDirectoryError) -> EmergencyAlertError {
    EmergencyAlertError::Internal {
        message: format!("user directory lookup failed: {error}"),
    }
}

/// Emergency alert service implementing the driving port.
///
/// The sender may be unsized so the server can pick a gateway at startup.
#[derive(Clone)]
pub struct EmergencyAlertService<D, N: ?Sized> {
    authenticator: Authenticator,
    directory: Arc<D>,
    sender: Arc<N>,
}

impl<D, N: ?Sized> EmergencyAlertService<D, N> {
    /// Create a service from its collaborators.
    pub fn new(authenticator: Authenticator, directory: Arc<D>, sender: Arc<N>) -> Self {
        Self {
            authenticator,
            directory,
            sender,
        }
    }
}

#[async_trait]
impl<D, N> EmergencyAlertCommand for EmergencyAlertService<D, N>
where
    D: UserDirectory,
    N: NotificationSender + ?Sized,
{
    async fn send_emergency_alert(
        &self,
        credential: Option<BearerToken>,
    ) -> Result<DispatchReceipt, EmergencyAlertError> {
        let principal = self
            .authenticator
            .require(credential.as_ref(), Role::Patient)?;
        let Principal::Patient(user_id) = principal else {
            return Err(EmergencyAlertError::Forbidden {
                message: "patient credential required".to_owned(),
            });
        };

        let record = self
            .directory
            .find_by_id(&user_id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "emergency alert for unknown user");
                EmergencyAlertError::Unauthorized {
                    message: "credential does not match a registered user".to_owned(),
                }
            })?;

        let Some(destination) = record.user.caregiver_phone().cloned() else {
            warn!(user_id = %user_id, "emergency alert without caregiver number");
            return Err(EmergencyAlertError::NotFound);
        };

        let message = SmsMessage::from(EmergencyAlert::compose(record.user.name(), destination));
        match self.sender.send_sms(&message).await {
            Ok(receipt) => {
                info!(
                    user_id = %user_id,
                    message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    status = receipt.status.as_deref().unwrap_or("-"),
                    "emergency alert dispatched"
                );
                Ok(receipt)
            }
            Err(err) => {
                error!(
                    user_id = %user_id,
                    error = %err,
                    transient = err.is_transient(),
                    "emergency alert dispatch failed"
                );
                Err(EmergencyAlertError::GatewayFailure(err))
            }
        }
    }
}

#[cfg(test)]
#[path = "emergency_tests.rs"]
mod tests;
