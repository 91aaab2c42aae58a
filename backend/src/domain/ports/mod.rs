//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (directory, registry, gateway, tokens, hashing) expose typed
//! errors generated by `define_port_error!` so adapters map failures into
//! predictable variants. Driving ports return the domain [`Error`]; the
//! emergency command keeps its own failure taxonomy so callers can tell the
//! cases apart.
//!
//! [`Error`]: crate::domain::Error

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod doctor_onboarding;
mod doctor_registry;
mod emergency_alert_command;
mod notification_sender;
mod password_hasher;
mod token_service;
mod user_directory;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, AccountSession};
#[cfg(test)]
pub use doctor_onboarding::MockDoctorOnboarding;
pub use doctor_onboarding::DoctorOnboarding;
#[cfg(test)]
pub use doctor_registry::MockDoctorRegistry;
pub use doctor_registry::{DoctorRegistry, DoctorRegistryError};
#[cfg(test)]
pub use emergency_alert_command::MockEmergencyAlertCommand;
pub use emergency_alert_command::EmergencyAlertCommand;
#[cfg(test)]
pub use notification_sender::MockNotificationSender;
pub use notification_sender::{DispatchReceipt, NotificationSendError, NotificationSender, SmsMessage};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, TokenError, TokenService};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError, UserRecord};
