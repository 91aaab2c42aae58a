//! The emergency button itself.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Notice, Session, TriggerError};

/// Transport timeout applied to each activation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the control is in its single-request cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerStatus {
    /// Ready to be pressed.
    #[default]
    Idle,
    /// Request in flight; the control should be disabled.
    Pending,
    /// Outcome available as a [`Notice`].
    Done,
}

#[derive(Debug, Deserialize)]
struct AlertEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Emergency button bound to an HTTP client.
///
/// There is no debounce and no retry: every call to
/// [`activate`](Self::activate) sends one request.
#[derive(Debug)]
pub struct EmergencyTrigger {
    client: reqwest::Client,
    status: TriggerStatus,
}

impl EmergencyTrigger {
    /// Create a trigger with the default transport timeout.
    ///
    /// # Errors
    /// Returns [`TriggerError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, TriggerError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a trigger with a custom transport timeout.
    ///
    /// # Errors
    /// Returns [`TriggerError::Client`] if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TriggerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            status: TriggerStatus::Idle,
        })
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> TriggerStatus {
        self.status
    }

    /// Return to [`TriggerStatus::Idle`] once the notice has been shown.
    pub const fn reset(&mut self) {
        self.status = TriggerStatus::Idle;
    }

    /// Press the button once and report the outcome.
    pub async fn activate(&mut self, session: &Session) -> Notice {
        self.status = TriggerStatus::Pending;
        let notice = self.send(session).await;
        self.status = TriggerStatus::Done;
        notice
    }

    async fn send(&self, session: &Session) -> Notice {
        let endpoint = match session.emergency_endpoint() {
            Ok(endpoint) => endpoint,
            Err(error) => {
                warn!(%error, "emergency endpoint unavailable");
                return Notice::failed(None);
            }
        };

        let response = match self
            .client
            .post(endpoint)
            .bearer_auth(session.token())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&serde_json::json!({}))
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, timeout = error.is_timeout(), "emergency request failed");
                return Notice::failed(None);
            }
        };

        let status = response.status();
        let envelope = match response.json::<AlertEnvelope>().await {
            Ok(envelope) => envelope,
            Err(error) => {
                warn!(%error, %status, "emergency response was not understood");
                return Notice::failed(None);
            }
        };
        debug!(%status, success = envelope.success, "emergency response received");

        if status.is_success() && envelope.success {
            Notice::sent()
        } else {
            Notice::failed(envelope.message)
        }
    }
}
