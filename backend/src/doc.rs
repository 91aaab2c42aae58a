//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (emergency alert,
//!   patient accounts, admin onboarding, doctor listing, health)
//! - **Schemas**: request and response envelopes plus the shared [`Error`]
//!   payload
//! - **Security**: bearer credential scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.
//!
//! [`Error`]: crate::domain::Error

use crate::domain::ports::DispatchReceipt;
use crate::domain::{Address, Error, ErrorCode, Speciality, User};
use crate::inbound::http::admin::{AddDoctorRequest, AdminTokenResponse, DoctorAddedResponse};
use crate::inbound::http::doctors::{DoctorListResponse, DoctorSummary};
use crate::inbound::http::emergency::EmergencyResponse;
use crate::inbound::http::users::{
    DoctorPhoneRequest, LoginRequest, ProfileResponse, RegisterRequest, SessionResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by the patient or admin login endpoints.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Prescripto backend API",
        description = "Patient accounts, doctor onboarding, and emergency SMS alerts.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::emergency::send_emergency_alert,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::set_doctor_phone,
        crate::inbound::http::admin::admin_login,
        crate::inbound::http::admin::add_doctor,
        crate::inbound::http::doctors::list_doctors,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Address,
        Speciality,
        DispatchReceipt,
        EmergencyResponse,
        RegisterRequest,
        LoginRequest,
        DoctorPhoneRequest,
        SessionResponse,
        ProfileResponse,
        AdminTokenResponse,
        AddDoctorRequest,
        DoctorAddedResponse,
        DoctorSummary,
        DoctorListResponse,
    )),
    tags(
        (name = "emergency", description = "Emergency SMS alerts to a patient's caregiver"),
        (name = "users", description = "Patient sign-up, login, and caregiver number"),
        (name = "admin", description = "Administrator login and doctor onboarding"),
        (name = "doctors", description = "Public doctor listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
