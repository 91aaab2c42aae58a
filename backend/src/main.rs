//! Backend entry-point: loads configuration, wires adapters, and serves the
//! REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use prescripto_backend::inbound::http::health::HealthState;
use prescripto_backend::inbound::http::token_config::{BuildMode, token_settings_from_env};
use prescripto_backend::outbound::twilio::TwilioSettings;
use server::{
    ServerConfig, ServerSettings, admin_credentials_from_env, create_server, sms_gateway_from_env,
};

fn config_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

fn load_config() -> std::io::Result<ServerConfig> {
    let args = [OsString::from("prescripto-backend")];
    let mode = BuildMode::from_debug_assertions();
    let settings = ServerSettings::load_from_iter(args.clone())
        .map_err(|e| config_error("failed to load server settings", e))?;
    let twilio = TwilioSettings::load_from_iter(args)
        .map_err(|e| config_error("failed to load Twilio settings", e))?;
    let token = token_settings_from_env(&DefaultEnv::new(), mode)
        .map_err(|e| config_error("invalid token configuration", e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| config_error("invalid server settings", e))?;
    let admin = admin_credentials_from_env(&DefaultEnv::new())
        .map_err(|e| config_error("invalid server settings", e))?;
    let gateway = sms_gateway_from_env(&DefaultEnv::new(), mode)
        .map_err(|e| config_error("invalid SMS gateway settings", e))?;
    info!(%bind_addr, ?gateway, ?twilio, "configuration loaded");
    Ok(ServerConfig::new(bind_addr, admin, token, gateway, twilio))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = load_config()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
