//! Public doctor listing.
//!
//! ```text
//! GET /api/doctor/list
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Address, Doctor, Error, Speciality};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Doctor profile as shown to patients. Emails and password hashes are
/// never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSummary {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Dr. Ravi Kumar")]
    pub name: String,
    #[schema(example = "+919876543210")]
    pub phone: String,
    pub speciality: Speciality,
    pub degree: String,
    pub experience: String,
    pub fees: u32,
    pub about: String,
    pub address: Address,
    pub available: bool,
}

impl From<&Doctor> for DoctorSummary {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id().to_string(),
            name: doctor.name().to_string(),
            phone: doctor.phone().to_string(),
            speciality: doctor.speciality(),
            degree: doctor.degree().to_owned(),
            experience: doctor.experience().to_owned(),
            fees: doctor.fees(),
            about: doctor.about().to_owned(),
            address: doctor.address().clone(),
            available: doctor.available(),
        }
    }
}

/// Listing envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorListResponse {
    pub success: bool,
    pub doctors: Vec<DoctorSummary>,
}

/// List every doctor in insertion order.
#[utoipa::path(
    get,
    path = "/api/doctor/list",
    responses(
        (status = 200, description = "Doctors", body = DoctorListResponse),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Registry unavailable", body = Error)
    ),
    tags = ["doctors"],
    operation_id = "listDoctors",
    security([])
)]
#[get("/list")]
pub async fn list_doctors(state: web::Data<HttpState>) -> ApiResult<web::Json<DoctorListResponse>> {
    let doctors = state.doctors.list_doctors().await?;
    Ok(web::Json(DoctorListResponse {
        success: true,
        doctors: doctors.iter().map(DoctorSummary::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDoctorOnboarding;
    use crate::domain::{DoctorDraft, DoctorId};
    use crate::inbound::http::test_utils::MockPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    fn doctor() -> Doctor {
        Doctor::try_from_draft(
            DoctorId::random(),
            DoctorDraft {
                name: "Dr. Ravi Kumar".into(),
                email: "ravi@clinic.example".into(),
                phone: "+91 98765 43210".into(),
                speciality: "Neurologist".into(),
                degree: "MBBS".into(),
                experience: "4 Years".into(),
                fees: 500,
                about: "Headache clinic".into(),
                address: Address {
                    line1: "12 MG Road".into(),
                    line2: "Bengaluru".into(),
                },
            },
        )
        .expect("valid doctor")
    }

    async fn get_list(doctors: MockDoctorOnboarding) -> actix_web::dev::ServiceResponse {
        let state = MockPorts {
            doctors,
            ..MockPorts::default()
        }
        .into_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api/doctor").service(list_doctors)),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/api/doctor/list")
            .to_request();
        actix_test::call_service(&app, request).await
    }

    #[actix_web::test]
    async fn lists_doctors_without_private_fields() {
        let stored = doctor();
        let mut doctors = MockDoctorOnboarding::new();
        let listed = stored.clone();
        doctors
            .expect_list_doctors()
            .returning(move || Ok(vec![listed.clone()]));

        let response = get_list(doctors).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["success"], true);
        let first = &value["doctors"][0];
        assert_eq!(first["id"], stored.id().to_string());
        assert_eq!(first["phone"], "+919876543210");
        assert_eq!(first["available"], true);
        assert!(first.get("email").is_none());
        assert!(first.get("password").is_none());
    }

    #[actix_web::test]
    async fn registry_outage_is_service_unavailable() {
        let mut doctors = MockDoctorOnboarding::new();
        doctors
            .expect_list_doctors()
            .returning(|| Err(Error::service_unavailable("doctor registry unavailable")));

        let response = get_list(doctors).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
