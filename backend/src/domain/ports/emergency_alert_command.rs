//! Driving port for the emergency alert use-case.
//!
//! Inbound adapters hand over whatever credential the caller presented (or
//! none) and get back either the gateway receipt or a categorised failure.

use async_trait::async_trait;

use crate::domain::{BearerToken, EmergencyAlertError};

use super::DispatchReceipt;

/// Domain use-case port for raising an emergency alert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmergencyAlertCommand: Send + Sync {
    /// Send one alert to the caller's caregiver.
    ///
    /// Not idempotent: each call performs its own gateway send.
    async fn send_emergency_alert(
        &self,
        credential: Option<BearerToken>,
    ) -> Result<DispatchReceipt, EmergencyAlertError>;
}
