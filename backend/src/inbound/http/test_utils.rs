//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockAccountCommand, MockDoctorOnboarding, MockEmergencyAlertCommand};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mock ports for handler tests; unconfigured mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub emergency: MockEmergencyAlertCommand,
    pub accounts: MockAccountCommand,
    pub doctors: MockDoctorOnboarding,
}

impl MockPorts {
    /// Wrap the mocks in shared handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            emergency: Arc::new(self.emergency),
            accounts: Arc::new(self.accounts),
            doctors: Arc::new(self.doctors),
        }))
    }
}
