//! Emergency alert HTTP handler.
//!
//! ```text
//! POST /api/user/emergency
//! Authorization: Bearer <token>
//! {}
//! ```
//!
//! Responses keep the `{ success, message }` envelope the web client reads
//! for its notification banner; failures also carry a machine-readable code.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::DispatchReceipt;
use crate::domain::{EmergencyAlertError, Error, ErrorCode};
use crate::inbound::http::bearer::BearerCredential;
use crate::inbound::http::error::{redact_if_internal, status_for};
use crate::inbound::http::state::HttpState;

/// Message returned when the gateway accepted the alert.
pub const ALERT_SENT_MESSAGE: &str = "Emergency alert sent";

/// Response envelope for the emergency endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyResponse {
    /// Whether the gateway accepted the alert.
    pub success: bool,
    /// Human-readable outcome shown to the patient.
    #[schema(example = "Emergency alert sent")]
    pub message: String,
    /// Failure category; absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Gateway message identifier, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Gateway status at acceptance time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Correlation identifier for failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl EmergencyResponse {
    fn sent(receipt: DispatchReceipt) -> Self {
        Self {
            success: true,
            message: ALERT_SENT_MESSAGE.to_owned(),
            code: None,
            message_id: receipt.message_id,
            status: receipt.status,
            trace_id: None,
        }
    }

    fn failed(error: &Error) -> Self {
        Self {
            success: false,
            message: error.message().to_owned(),
            code: Some(error.code()),
            message_id: None,
            status: None,
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

fn failure_response(error: EmergencyAlertError) -> HttpResponse {
    debug!(error = %error, "emergency alert failed");
    let error = redact_if_internal(&Error::from(error));
    HttpResponse::build(status_for(error.code())).json(EmergencyResponse::failed(&error))
}

/// Send an emergency SMS to the caller's caregiver number.
///
/// The request body is ignored; the message is composed server-side. Every
/// call performs its own send.
#[utoipa::path(
    post,
    path = "/api/user/emergency",
    responses(
        (status = 200, description = "Alert accepted by the SMS gateway", body = EmergencyResponse),
        (status = 401, description = "Missing or invalid credential", body = EmergencyResponse),
        (status = 403, description = "Credential is not a patient's", body = EmergencyResponse),
        (status = 404, description = "No caregiver number on file", body = EmergencyResponse),
        (status = 500, description = "Gateway failure or internal error", body = EmergencyResponse)
    ),
    tags = ["emergency"],
    operation_id = "sendEmergencyAlert"
)]
#[post("/emergency")]
pub async fn send_emergency_alert(
    state: web::Data<HttpState>,
    credential: BearerCredential,
) -> HttpResponse {
    match state
        .emergency
        .send_emergency_alert(credential.into_inner())
        .await
    {
        Ok(receipt) => HttpResponse::Ok().json(EmergencyResponse::sent(receipt)),
        Err(error) => failure_response(error),
    }
}

#[cfg(test)]
#[path = "emergency_tests.rs"]
mod tests;
