//! HTTP server configuration object and helpers.
//!
//! The bind address loads through OrthoConfig. Administrator credentials and
//! the SMS gateway choice are read verbatim through `mockable::Env` so that
//! all-digit passwords and `+`-prefixed numbers survive untouched.

use std::net::SocketAddr;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use prescripto_backend::domain::{AdminCredentials, EmailAddress, Password};
use prescripto_backend::inbound::http::token_config::{
    BOOL_EXPECTED, BuildMode, TokenSettings, parse_bool,
};
use prescripto_backend::outbound::twilio::{
    TwilioAccount, TwilioCredentialsError, TwilioSettings, twilio_account_from_env,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const ADMIN_EMAIL_ENV: &str = "PRESCRIPTO_ADMIN_EMAIL";
const ADMIN_PASSWORD_ENV: &str = "PRESCRIPTO_ADMIN_PASSWORD";
const ALLOW_LOGGING_SMS_ENV: &str = "PRESCRIPTO_ALLOW_LOGGING_SMS";

/// Listener settings loaded via OrthoConfig.
#[derive(Clone, Debug, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PRESCRIPTO")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
}

/// Invalid server settings.
#[derive(Debug, thiserror::Error)]
pub enum ServerSettingsError {
    #[error("PRESCRIPTO_BIND_ADDR is not a socket address: {value}")]
    BindAddr { value: String },
    #[error("PRESCRIPTO_ADMIN_EMAIL and PRESCRIPTO_ADMIN_PASSWORD must both be set")]
    MissingAdmin,
    #[error("invalid administrator credentials: {message}")]
    InvalidAdmin { message: String },
    #[error(transparent)]
    Twilio(#[from] TwilioCredentialsError),
    #[error(
        "release builds need Twilio credentials; set PRESCRIPTO_ALLOW_LOGGING_SMS=1 to log alerts instead"
    )]
    GatewayRequired,
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ServerSettings {
    /// Parse the bind address, falling back to all interfaces on port 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let raw = self
            .bind_addr
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| ServerSettingsError::BindAddr {
            value: raw.to_owned(),
        })
    }
}

/// Read and validate the administrator account.
///
/// # Errors
///
/// Fails when either variable is unset or blank, or when the email is
/// malformed.
pub fn admin_credentials_from_env<E: Env>(
    env: &E,
) -> Result<AdminCredentials, ServerSettingsError> {
    let email = env
        .string(ADMIN_EMAIL_ENV)
        .filter(|value| !value.trim().is_empty());
    let password = env
        .string(ADMIN_PASSWORD_ENV)
        .filter(|value| !value.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(ServerSettingsError::MissingAdmin);
    };
    let email = EmailAddress::new(email).map_err(|err| ServerSettingsError::InvalidAdmin {
        message: err.to_string(),
    })?;
    let password =
        Password::for_login(&password).map_err(|err| ServerSettingsError::InvalidAdmin {
            message: err.to_string(),
        })?;
    Ok(AdminCredentials::new(email, password))
}

/// Where emergency SMS messages go.
#[derive(Clone, Debug)]
pub enum SmsGateway {
    /// Deliver through the Twilio Messages API.
    Twilio(TwilioAccount),
    /// Log messages without sending them.
    Logging,
}

/// Choose the SMS gateway from the environment.
///
/// A complete Twilio account always wins. Without one, debug builds log
/// alerts; release builds refuse to start unless `PRESCRIPTO_ALLOW_LOGGING_SMS`
/// is set. A partial Twilio account is an error in every build mode.
///
/// # Errors
///
/// Returns [`ServerSettingsError`] for partial Twilio settings, a missing
/// gateway in release builds, or an unparsable opt-in flag in release builds.
pub fn sms_gateway_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SmsGateway, ServerSettingsError> {
    if let Some(account) = twilio_account_from_env(env)? {
        return Ok(SmsGateway::Twilio(account));
    }
    if mode == BuildMode::Debug || allow_logging_sms(env, mode)? {
        warn!("Twilio not configured; emergency alerts will only be logged");
        return Ok(SmsGateway::Logging);
    }
    Err(ServerSettingsError::GatewayRequired)
}

fn allow_logging_sms<E: Env>(env: &E, mode: BuildMode) -> Result<bool, ServerSettingsError> {
    let Some(value) = env.string(ALLOW_LOGGING_SMS_ENV) else {
        return Ok(false);
    };
    match parse_bool(value.trim()) {
        Some(flag) => Ok(flag),
        None if mode == BuildMode::Debug => {
            warn!(value = %value, "invalid PRESCRIPTO_ALLOW_LOGGING_SMS; defaulting to disabled");
            Ok(false)
        }
        None => Err(ServerSettingsError::InvalidEnv {
            name: ALLOW_LOGGING_SMS_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

/// Everything needed to assemble the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) admin: AdminCredentials,
    pub(crate) token: TokenSettings,
    pub(crate) gateway: SmsGateway,
    pub(crate) twilio: TwilioSettings,
}

impl ServerConfig {
    /// Construct a server configuration from validated parts.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        admin: AdminCredentials,
        token: TokenSettings,
        gateway: SmsGateway,
        twilio: TwilioSettings,
    ) -> Self {
        Self {
            bind_addr,
            admin,
            token,
            gateway,
            twilio,
        }
    }
}
