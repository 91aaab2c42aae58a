//! DTOs for the Twilio Messages API.
//!
//! Twilio expects form-encoded requests and answers with JSON. The adapter
//! decodes into these transport DTOs first, then maps into the domain receipt.

use serde::{Deserialize, Serialize};

use crate::domain::ports::DispatchReceipt;

#[derive(Debug, Serialize)]
pub(super) struct SendMessageForm<'a> {
    #[serde(rename = "To")]
    pub(super) to: &'a str,
    #[serde(rename = "From")]
    pub(super) from: &'a str,
    #[serde(rename = "Body")]
    pub(super) body: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageResourceDto {
    pub(super) sid: Option<String>,
    pub(super) status: Option<String>,
    pub(super) error_code: Option<i64>,
    pub(super) error_message: Option<String>,
}

impl MessageResourceDto {
    /// Convert into a receipt, or describe the error Twilio reported inline.
    pub(super) fn into_receipt(self) -> Result<DispatchReceipt, String> {
        if let Some(code) = self.error_code {
            return Err(self
                .error_message
                .unwrap_or_else(|| format!("error code {code}")));
        }
        Ok(DispatchReceipt {
            message_id: self.sid,
            status: self.status,
        })
    }
}
