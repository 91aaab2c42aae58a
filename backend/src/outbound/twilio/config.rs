//! Twilio gateway configuration.
//!
//! Transport settings (API origin, timeout) load through OrthoConfig. The
//! account SID, auth token, and sender number are read verbatim through
//! `mockable::Env`: typed env parsing would turn `+15550001111` or an
//! all-digit token into integers and lose the leading `+` or zeros.

use std::time::Duration;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::http_sender::TwilioAccount;
use crate::domain::PhoneNumber;

const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the account SID.
pub const ACCOUNT_SID_ENV: &str = "TWILIO_ACCOUNT_SID";
/// Environment variable holding the auth token.
pub const AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";
/// Environment variable holding the sender number.
pub const PHONE_NUMBER_ENV: &str = "TWILIO_PHONE_NUMBER";

/// Transport settings for the Twilio SMS gateway.
#[derive(Clone, Debug, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TWILIO")]
pub struct TwilioSettings {
    /// Override for the REST API origin.
    pub api_base_url: Option<String>,
    /// Request timeout for a single send, in seconds.
    pub timeout_secs: Option<u64>,
}

impl TwilioSettings {
    /// Return the configured API origin, falling back to the public endpoint.
    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Return the request timeout; unset or zero means ten seconds.
    pub fn timeout(&self) -> Duration {
        let secs = self
            .timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

/// Invalid Twilio account configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TwilioCredentialsError {
    /// Some account variables are set and others are not.
    #[error("incomplete Twilio configuration; missing {missing}")]
    Incomplete { missing: String },
    /// The sender number is not a dialable E.164 number.
    #[error("invalid {PHONE_NUMBER_ENV}='{value}': {message}")]
    InvalidSender { value: String, message: String },
}

/// Read the Twilio account from the environment.
///
/// Returns `Ok(None)` when none of the three variables is set. Blank values
/// count as unset. A partial configuration is an error so a typo cannot
/// silently disable the gateway.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use prescripto_backend::outbound::twilio::twilio_account_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "TWILIO_ACCOUNT_SID" => Some("AC123".to_owned()),
///     "TWILIO_AUTH_TOKEN" => Some("12345678".to_owned()),
///     "TWILIO_PHONE_NUMBER" => Some("+15550001111".to_owned()),
///     _ => None,
/// });
///
/// let account = twilio_account_from_env(&env).expect("valid").expect("configured");
/// assert_eq!(account.from(), "+15550001111");
/// ```
///
/// # Errors
///
/// Returns [`TwilioCredentialsError`] for partial or malformed settings.
pub fn twilio_account_from_env<E: Env>(
    env: &E,
) -> Result<Option<TwilioAccount>, TwilioCredentialsError> {
    let read = |name: &str| {
        env.string(name)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    };
    let account_sid = read(ACCOUNT_SID_ENV);
    let auth_token = read(AUTH_TOKEN_ENV);
    let phone_number = read(PHONE_NUMBER_ENV);

    match (account_sid, auth_token, phone_number) {
        (None, None, None) => Ok(None),
        (Some(account_sid), Some(auth_token), Some(phone_number)) => {
            let sender = PhoneNumber::parse(&phone_number).map_err(|err| {
                TwilioCredentialsError::InvalidSender {
                    value: phone_number.clone(),
                    message: err.to_string(),
                }
            })?;
            Ok(Some(TwilioAccount::new(
                account_sid,
                auth_token,
                sender.as_ref(),
            )))
        }
        (account_sid, auth_token, phone_number) => {
            let missing = [
                (ACCOUNT_SID_ENV, account_sid.is_none()),
                (AUTH_TOKEN_ENV, auth_token.is_none()),
                (PHONE_NUMBER_ENV, phone_number.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect::<Vec<_>>()
            .join(", ");
            Err(TwilioCredentialsError::Incomplete { missing })
        }
    }
}
