//! Twilio outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `NotificationSender` port against the Twilio Messages API.

mod config;
mod dto;
mod http_sender;

pub use config::{
    ACCOUNT_SID_ENV, AUTH_TOKEN_ENV, PHONE_NUMBER_ENV, TwilioCredentialsError, TwilioSettings,
    twilio_account_from_env,
};
pub use http_sender::{TwilioAccount, TwilioSetupError, TwilioSmsSender};
