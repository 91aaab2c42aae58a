//! Press the emergency button once on behalf of a signed-in patient.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use emergency_trigger::{EmergencyTrigger, Session};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

/// `emergency-trigger` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "emergency-trigger",
    about = "Send an emergency alert to the caregiver number on file",
    version
)]
struct CliArgs {
    /// Backend origin, for example `https://api.prescripto.example`.
    #[arg(long = "backend-url", value_name = "url")]
    backend_url: String,
    /// Bearer token from the patient login.
    #[arg(long = "token", value_name = "token")]
    token: String,
    /// Transport timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "secs", default_value_t = 15)]
    timeout_secs: u64,
}

fn main() -> ExitCode {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        report(&format!("tracing init failed: {error}"));
    }

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            report(&format!("emergency-trigger: {error}"));
            ExitCode::from(2)
        }
    }
}

fn report(message: &str) {
    if let Err(error) = writeln!(io::stderr().lock(), "{message}") {
        drop(error);
    }
}

fn run() -> io::Result<bool> {
    let args = CliArgs::parse();
    let session = Session::new(&args.backend_url, args.token).map_err(io::Error::other)?;
    let mut trigger = EmergencyTrigger::with_timeout(Duration::from_secs(args.timeout_secs))
        .map_err(io::Error::other)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    let notice = runtime.block_on(trigger.activate(&session));

    writeln!(io::stdout().lock(), "{notice}")?;
    Ok(notice.is_success())
}
