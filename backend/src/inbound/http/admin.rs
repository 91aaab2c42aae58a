//! Administrator handlers.
//!
//! ```text
//! POST /api/admin/login {"email":"admin@prescripto.example","password":"..."}
//! POST /api/admin/add-doctor  (Authorization: Bearer <admin token>)
//! ```
//!
//! Profile images are not accepted; doctors are onboarded from JSON only.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Address, DoctorDraft, Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerCredential;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{LoginRequest, credentials_validation_error};

/// Message returned once a doctor has been stored.
pub const DOCTOR_ADDED_MESSAGE: &str = "Doctor added";

/// Admin session token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminTokenResponse {
    pub success: bool,
    pub token: String,
}

/// Request body for `POST /api/admin/add-doctor`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddDoctorRequest {
    #[schema(example = "Dr. Ravi Kumar")]
    pub name: String,
    #[schema(example = "ravi@clinic.example")]
    pub email: String,
    pub password: String,
    #[schema(example = "+919876543210")]
    pub phone: String,
    #[schema(example = "Neurologist")]
    pub speciality: String,
    #[schema(example = "MBBS")]
    pub degree: String,
    #[schema(example = "4 Years")]
    pub experience: String,
    #[schema(example = 500)]
    pub fees: i64,
    pub about: String,
    pub address: Address,
}

impl AddDoctorRequest {
    fn into_parts(self) -> (DoctorDraft, String) {
        let draft = DoctorDraft {
            name: self.name,
            email: self.email,
            phone: self.phone,
            speciality: self.speciality,
            degree: self.degree,
            experience: self.experience,
            fees: self.fees,
            about: self.about,
            address: self.address,
        };
        (draft, self.password)
    }
}

/// Confirmation of a stored doctor.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAddedResponse {
    pub success: bool,
    pub message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub doctor_id: String,
}

/// Sign the administrator in.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AdminTokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/login")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AdminTokenResponse>> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
        .map_err(credentials_validation_error)?;
    let issued = state.doctors.admin_login(credentials).await?;
    Ok(web::Json(AdminTokenResponse {
        success: true,
        token: issued.token.expose().to_owned(),
    }))
}

/// Onboard a doctor.
#[utoipa::path(
    post,
    path = "/api/admin/add-doctor",
    request_body = AddDoctorRequest,
    responses(
        (status = 200, description = "Doctor added", body = DoctorAddedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "addDoctor"
)]
#[post("/add-doctor")]
pub async fn add_doctor(
    state: web::Data<HttpState>,
    credential: BearerCredential,
    payload: web::Json<AddDoctorRequest>,
) -> ApiResult<HttpResponse> {
    let (draft, password) = payload.into_inner().into_parts();
    let doctor_id = state
        .doctors
        .add_doctor(credential.into_inner(), draft, password)
        .await?;
    Ok(HttpResponse::Ok().json(DoctorAddedResponse {
        success: true,
        message: DOCTOR_ADDED_MESSAGE.to_owned(),
        doctor_id: doctor_id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDoctorOnboarding;
    use crate::domain::{BearerToken, DoctorId, ErrorCode, IssuedToken};
    use crate::inbound::http::test_utils::MockPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::Utc;
    use serde_json::{Value, json};

    fn test_app(
        doctors: MockDoctorOnboarding,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = MockPorts {
            doctors,
            ..MockPorts::default()
        }
        .into_state();
        App::new().app_data(state).service(
            web::scope("/api/admin")
                .service(admin_login)
                .service(add_doctor),
        )
    }

    fn doctor_payload() -> Value {
        json!({
            "name": "Dr. Ravi Kumar",
            "email": "ravi@clinic.example",
            "password": "clinic-pass",
            "phone": "+919876543210",
            "speciality": "Neurologist",
            "degree": "MBBS",
            "experience": "4 Years",
            "fees": 500,
            "about": "Headache clinic",
            "address": { "line1": "12 MG Road", "line2": "Bengaluru" }
        })
    }

    #[actix_web::test]
    async fn admin_login_returns_a_token() {
        let mut doctors = MockDoctorOnboarding::new();
        doctors
            .expect_admin_login()
            .withf(|credentials| credentials.email().as_ref() == "admin@prescripto.example")
            .returning(|_| {
                Ok(IssuedToken {
                    token: BearerToken::new("admin-token").expect("token"),
                    expires_at: Utc::now(),
                })
            });
        let app = actix_test::init_service(test_app(doctors)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(json!({ "email": "admin@prescripto.example", "password": "secret" }))
            .to_request();
        let body: AdminTokenResponse = actix_test::call_and_read_body_json(&app, request).await;
        assert!(body.success);
        assert_eq!(body.token, "admin-token");
    }

    #[actix_web::test]
    async fn add_doctor_forwards_draft_and_credential() {
        let id = DoctorId::random();
        let mut doctors = MockDoctorOnboarding::new();
        doctors
            .expect_add_doctor()
            .withf(|credential, draft, password| {
                credential.as_ref().map(BearerToken::expose) == Some("admin-token")
                    && draft.email == "ravi@clinic.example"
                    && draft.address.line2 == "Bengaluru"
                    && password == "clinic-pass"
            })
            .times(1)
            .returning(move |_, _, _| Ok(id));
        let app = actix_test::init_service(test_app(doctors)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/admin/add-doctor")
            .insert_header(("atoken", "admin-token"))
            .set_json(doctor_payload())
            .to_request();
        let body: DoctorAddedResponse = actix_test::call_and_read_body_json(&app, request).await;
        assert!(body.success);
        assert_eq!(body.message, DOCTOR_ADDED_MESSAGE);
        assert_eq!(body.doctor_id, id.to_string());
    }

    #[actix_web::test]
    async fn add_doctor_surfaces_role_failures() {
        let mut doctors = MockDoctorOnboarding::new();
        doctors
            .expect_add_doctor()
            .returning(|_, _, _| Err(Error::forbidden("admin credential required")));
        let app = actix_test::init_service(test_app(doctors)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/admin/add-doctor")
            .insert_header(("Authorization", "Bearer patient-token"))
            .set_json(doctor_payload())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let error: Error = actix_test::read_body_json(response).await;
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[actix_web::test]
    async fn add_doctor_requires_every_field() {
        let mut doctors = MockDoctorOnboarding::new();
        doctors.expect_add_doctor().times(0);
        let app = actix_test::init_service(test_app(doctors)).await;

        let mut payload = doctor_payload();
        if let Some(object) = payload.as_object_mut() {
            object.remove("address");
        }
        let request = actix_test::TestRequest::post()
            .uri("/api/admin/add-doctor")
            .insert_header(("Authorization", "Bearer admin-token"))
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
