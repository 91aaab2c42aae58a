//! Driven port for the third-party SMS gateway.
//!
//! The domain owns the message shape and the acceptance receipt so the alert
//! service stays ignorant of which gateway (if any) is wired in.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::PhoneNumber;

use super::define_port_error;

/// One outbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Destination in E.164 form.
    pub to: PhoneNumber,
    /// Message text.
    pub body: String,
}

/// Gateway acknowledgement that a message was accepted for delivery.
///
/// Acceptance is not delivery; gateways report delivery asynchronously and
/// that is not tracked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReceipt {
    /// Gateway-assigned message identifier, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "SM0123456789abcdef0123456789abcdef")]
    pub message_id: Option<String>,
    /// Gateway status at acceptance time (for example `queued`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "queued")]
    pub status: Option<String>,
}

define_port_error! {
    /// Failures surfaced while handing a message to the gateway.
    pub enum NotificationSendError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "sms gateway transport failed: {message}",
        /// The gateway did not answer within the configured timeout.
        Timeout { message: String } =>
            "sms gateway timed out: {message}",
        /// The gateway throttled the request.
        RateLimited { message: String } =>
            "sms gateway rate limited request: {message}",
        /// The gateway refused the message.
        Rejected { message: String } =>
            "sms gateway rejected message: {message}",
        /// The gateway response could not be decoded.
        Decode { message: String } =>
            "sms gateway response decode failed: {message}",
    }
}

impl NotificationSendError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// Emergency alerts are never retried automatically; this only informs
    /// logging.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Port for sending text messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Hand one message to the gateway.
    ///
    /// Implementations make exactly one attempt.
    async fn send_sms(&self, message: &SmsMessage) -> Result<DispatchReceipt, NotificationSendError>;
}
