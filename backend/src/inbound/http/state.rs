//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, DoctorOnboarding, EmergencyAlertCommand};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub emergency: Arc<dyn EmergencyAlertCommand>,
    pub accounts: Arc<dyn AccountCommand>,
    pub doctors: Arc<dyn DoctorOnboarding>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub emergency: Arc<dyn EmergencyAlertCommand>,
    pub accounts: Arc<dyn AccountCommand>,
    pub doctors: Arc<dyn DoctorOnboarding>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            emergency,
            accounts,
            doctors,
        } = ports;
        Self {
            emergency,
            accounts,
            doctors,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
