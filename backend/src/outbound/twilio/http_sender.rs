//! Reqwest-backed Twilio SMS adapter.
//!
//! This adapter owns transport details only: form serialisation, basic auth,
//! timeout and HTTP error mapping, and JSON decoding into a dispatch receipt.
//! It makes exactly one attempt per message.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{MessageResourceDto, SendMessageForm};
use crate::domain::ports::{DispatchReceipt, NotificationSendError, NotificationSender, SmsMessage};

/// Credentials and sender identity for one Twilio account.
#[derive(Clone)]
pub struct TwilioAccount {
    account_sid: String,
    auth_token: Zeroizing<String>,
    from: String,
}

impl TwilioAccount {
    /// Bundle the account SID, auth token, and sender number.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: Zeroizing::new(auth_token.into()),
            from: from.into(),
        }
    }

    /// Account SID, safe to log.
    pub fn account_sid(&self) -> &str {
        &self.account_sid
    }

    /// Sender number in E.164 form.
    pub fn from(&self) -> &str {
        &self.from
    }
}

impl fmt::Debug for TwilioAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioAccount")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

/// Failures while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum TwilioSetupError {
    /// The configured API origin does not form a valid URL.
    #[error("invalid Twilio API URL: {0}")]
    Url(#[from] url::ParseError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Notification sender that posts to the Twilio Messages API.
pub struct TwilioSmsSender {
    client: Client,
    endpoint: Url,
    account: TwilioAccount,
}

impl TwilioSmsSender {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let sender = TwilioSmsSender::new("https://api.twilio.com", account, timeout)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is malformed or the reqwest
    /// client cannot be constructed.
    pub fn new(
        api_base_url: &str,
        account: TwilioAccount,
        timeout: Duration,
    ) -> Result<Self, TwilioSetupError> {
        let endpoint = messages_endpoint(api_base_url, &account.account_sid)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            account,
        })
    }
}

fn messages_endpoint(api_base_url: &str, account_sid: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/2010-04-01/Accounts/{account_sid}/Messages.json",
        api_base_url.trim_end_matches('/'),
    ))
}

#[async_trait]
impl NotificationSender for TwilioSmsSender {
    async fn send_sms(
        &self,
        message: &SmsMessage,
    ) -> Result<DispatchReceipt, NotificationSendError> {
        debug!(to = %message.to, "sending SMS via Twilio");
        let form = SendMessageForm {
            to: message.to.as_ref(),
            from: &self.account.from,
            body: &message.body,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(
                &self.account.account_sid,
                Some(self.account.auth_token.as_str()),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_receipt(body.as_ref())
    }
}

fn parse_receipt(body: &[u8]) -> Result<DispatchReceipt, NotificationSendError> {
    let decoded: MessageResourceDto = serde_json::from_slice(body).map_err(|error| {
        NotificationSendError::decode(format!("invalid Twilio JSON payload: {error}"))
    })?;
    decoded
        .into_receipt()
        .map_err(NotificationSendError::rejected)
}

fn map_transport_error(error: reqwest::Error) -> NotificationSendError {
    if error.is_timeout() {
        NotificationSendError::timeout(error.to_string())
    } else {
        NotificationSendError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> NotificationSendError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => NotificationSendError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            NotificationSendError::timeout(message)
        }
        _ => NotificationSendError::rejected(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_sender_tests.rs"]
mod tests;
