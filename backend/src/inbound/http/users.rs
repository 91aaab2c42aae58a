//! Patient account handlers.
//!
//! ```text
//! POST /api/user/register {"name":"Asha","email":"asha@example.com","password":"correct horse","phone":"+919876543210"}
//! POST /api/user/login {"email":"asha@example.com","password":"correct horse"}
//! PUT /api/user/doctor-phone {"doctorPhone":"+15551234567"}
//! ```

use actix_web::{HttpResponse, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::AccountSession;
use crate::domain::{
    CredentialsValidationError, Error, LoginCredentials, PhoneNumber, Registration, User,
    registration_validation_error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerCredential;
use crate::inbound::http::state::HttpState;

/// Sign-up request body for `POST /api/user/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Asha")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "+919876543210")]
    pub phone: String,
    /// Caregiver number; may also be set later.
    #[serde(default)]
    #[schema(example = "+15551234567")]
    pub doctor_phone: Option<String>,
}

/// Login request body for `POST /api/user/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "asha@example.com")]
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /api/user/doctor-phone`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPhoneRequest {
    #[schema(example = "+15551234567")]
    pub doctor_phone: String,
}

/// Issued session returned by sign-up and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub success: bool,
    pub token: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    #[schema(value_type = String, format = DateTime)]
    pub expires_at: DateTime<Utc>,
}

impl From<AccountSession> for SessionResponse {
    fn from(value: AccountSession) -> Self {
        Self {
            success: true,
            token: value.token.token.expose().to_owned(),
            user_id: value.user_id.to_string(),
            expires_at: value.token.expires_at,
        }
    }
}

/// Profile returned after the caregiver number changes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

pub(crate) fn credentials_validation_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::Email(_) => "email",
        CredentialsValidationError::EmptyPassword
        | CredentialsValidationError::PasswordTooShort { .. } => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Create a patient account and sign it in.
#[utoipa::path(
    post,
    path = "/api/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let request = payload.into_inner();
    let registration = Registration::try_from_parts(
        &request.name,
        &request.email,
        &request.password,
        &request.phone,
        request.doctor_phone.as_deref(),
    )
    .map_err(registration_validation_error)?;
    let session = state.accounts.register(registration).await?;
    Ok(web::Json(session.into()))
}

/// Sign a patient in.
///
/// Unknown emails and wrong passwords produce the same 401 response.
#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "loginUser",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
        .map_err(credentials_validation_error)?;
    let session = state.accounts.login(credentials).await?;
    Ok(web::Json(session.into()))
}

/// Record the caregiver number emergency alerts are sent to.
#[utoipa::path(
    put,
    path = "/api/user/doctor-phone",
    request_body = DoctorPhoneRequest,
    responses(
        (status = 200, description = "Caregiver number saved", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "setDoctorPhone"
)]
#[put("/doctor-phone")]
pub async fn set_doctor_phone(
    state: web::Data<HttpState>,
    credential: BearerCredential,
    payload: web::Json<DoctorPhoneRequest>,
) -> ApiResult<HttpResponse> {
    let phone = PhoneNumber::parse(&payload.doctor_phone).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "doctorPhone" }))
    })?;
    let user = state
        .accounts
        .set_doctor_phone(credential.into_inner(), phone)
        .await?;
    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        message: "Doctor phone updated".to_owned(),
        user,
    }))
}
