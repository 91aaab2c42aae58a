//! Builders wiring domain services to their outbound adapters.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use prescripto_backend::domain::ports::{NotificationSender, TokenService};
use prescripto_backend::domain::{
    AccountService, Authenticator, DoctorOnboardingService, EmergencyAlertService,
};
use prescripto_backend::inbound::http::state::{HttpState, HttpStatePorts};
use prescripto_backend::outbound::auth::{Argon2PasswordHasher, JwtTokenService};
use prescripto_backend::outbound::memory::{InMemoryDoctorRegistry, InMemoryUserDirectory};
use prescripto_backend::outbound::sms_logging::LoggingSmsSender;
use prescripto_backend::outbound::twilio::{TwilioSettings, TwilioSetupError, TwilioSmsSender};

use super::ServerConfig;
use super::config::SmsGateway;

/// Build the adapter for the chosen SMS gateway.
pub(crate) fn build_notification_sender(
    gateway: &SmsGateway,
    settings: &TwilioSettings,
) -> Result<Arc<dyn NotificationSender>, TwilioSetupError> {
    match gateway {
        SmsGateway::Twilio(account) => {
            info!(
                account_sid = account.account_sid(),
                api_base_url = settings.api_base_url(),
                "sending emergency alerts through Twilio"
            );
            let sender = TwilioSmsSender::new(
                settings.api_base_url(),
                account.clone(),
                settings.timeout(),
            )?;
            Ok(Arc::new(sender))
        }
        SmsGateway::Logging => {
            warn!("emergency alerts will only be logged");
            Ok(Arc::new(LoggingSmsSender))
        }
    }
}

/// Build the handler state from configuration.
pub(crate) fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, TwilioSetupError> {
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        &config.token.secret,
        config.token.ttl,
        Arc::new(mockable::DefaultClock),
    ));
    let authenticator = Authenticator::new(tokens);
    let directory = Arc::new(InMemoryUserDirectory::new());
    let registry = Arc::new(InMemoryDoctorRegistry::new());
    let hasher = Arc::new(Argon2PasswordHasher);
    let sender = build_notification_sender(&config.gateway, &config.twilio)?;

    let ports = HttpStatePorts {
        emergency: Arc::new(EmergencyAlertService::new(
            authenticator.clone(),
            directory.clone(),
            sender,
        )),
        accounts: Arc::new(AccountService::new(
            authenticator.clone(),
            directory,
            hasher.clone(),
        )),
        doctors: Arc::new(DoctorOnboardingService::new(
            authenticator,
            registry,
            hasher,
            config.admin.clone(),
        )),
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
