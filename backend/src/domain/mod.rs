//! Domain primitives, services, and ports.
//!
//! Purpose: hold the transport-agnostic core of the platform. Inbound
//! adapters parse requests into these types and call the driving ports;
//! outbound adapters implement the driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: error payload shared by every endpoint.
//! - User, PhoneNumber, and friends: validated patient attributes.
//! - EmergencyAlertService: the emergency SMS use-case.
//! - AccountService / DoctorOnboardingService: surrounding account flows.

pub mod accounts;
pub mod auth;
pub mod authenticator;
pub mod doctor;
pub mod doctor_onboarding;
pub mod emergency;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::accounts::{
    AccountService, Registration, RegistrationValidationError, registration_validation_error,
};
pub use self::auth::{
    BearerToken, CredentialsValidationError, IssuedToken, LoginCredentials, PASSWORD_MIN_LEN,
    Password, PasswordHash, Principal, Role,
};
pub use self::authenticator::{AccessDenied, Authenticator};
pub use self::doctor::{
    Address, Doctor, DoctorDraft, DoctorId, DoctorValidationError, Speciality,
};
pub use self::doctor_onboarding::{AdminCredentials, DoctorOnboardingService};
pub use self::emergency::{
    CAREGIVER_NOT_FOUND_MESSAGE, EmergencyAlert, EmergencyAlertError, EmergencyAlertService,
    GATEWAY_FAILURE_MESSAGE,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DEFAULT_COUNTRY_CODE, DISPLAY_NAME_MAX, DisplayName, EmailAddress, PhoneNumber,
    PhoneNumberValidationError, User, UserId, UserValidationError,
};
