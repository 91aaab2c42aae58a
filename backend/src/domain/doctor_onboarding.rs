//! Administrator login, doctor onboarding, and the public doctor listing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use super::accounts::{map_hash_error, map_token_error};
use super::authenticator::Authenticator;
use super::ports::{DoctorOnboarding, DoctorRegistry, DoctorRegistryError, PasswordHasher};
use super::{
    BearerToken, Doctor, DoctorDraft, DoctorId, EmailAddress, Error, IssuedToken,
    LoginCredentials, Password, Principal, Role,
};

/// Administrator account configured at deployment time.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    email: EmailAddress,
    password: Password,
}

impl AdminCredentials {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }

    /// Check a login attempt against the configured account.
    ///
    /// Both fields are compared in constant time and both comparisons always
    /// run, so response timing does not reveal which one differed.
    pub fn matches(&self, credentials: &LoginCredentials) -> bool {
        let email = self
            .email
            .as_ref()
            .as_bytes()
            .ct_eq(credentials.email().as_ref().as_bytes());
        let password = self
            .password
            .expose()
            .as_bytes()
            .ct_eq(credentials.password().expose().as_bytes());
        bool::from(email & password)
    }
}

fn map_registry_error(error: DoctorRegistryError) -> Error {
    match error {
        DoctorRegistryError::Connection { message } => {
            Error::service_unavailable(format!("doctor registry unavailable: {message}"))
        }
        DoctorRegistryError::Query { message } => {
            Error::internal(format!("doctor registry error: {message}"))
        }
        DoctorRegistryError::DuplicateEmail { .. } => {
            Error::conflict("doctor email already registered")
        }
    }
}

/// Doctor onboarding service implementing the driving port.
#[derive(Clone)]
pub struct DoctorOnboardingService<R, H> {
    authenticator: Authenticator,
    registry: Arc<R>,
    hasher: Arc<H>,
    admin: AdminCredentials,
}

impl<R, H> DoctorOnboardingService<R, H> {
    /// Create a service from its collaborators and the administrator account.
    pub fn new(
        authenticator: Authenticator,
        registry: Arc<R>,
        hasher: Arc<H>,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            authenticator,
            registry,
            hasher,
            admin,
        }
    }
}

#[async_trait]
impl<R, H> DoctorOnboarding for DoctorOnboardingService<R, H>
where
    R: DoctorRegistry,
    H: PasswordHasher,
{
    async fn admin_login(&self, credentials: LoginCredentials) -> Result<IssuedToken, Error> {
        if !self.admin.matches(&credentials) {
            warn!("administrator login rejected");
            return Err(Error::unauthorized("invalid credentials"));
        }
        self.authenticator
            .tokens()
            .issue(&Principal::Admin(credentials.email().clone()))
            .map_err(map_token_error)
    }

    async fn add_doctor(
        &self,
        credential: Option<BearerToken>,
        draft: DoctorDraft,
        password: String,
    ) -> Result<DoctorId, Error> {
        self.authenticator.require(credential.as_ref(), Role::Admin)?;

        let password = Password::for_registration(&password).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "password" }))
        })?;
        let doctor = Doctor::try_from_draft(DoctorId::random(), draft).map_err(|err| {
            let field = err.field();
            Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
        })?;

        let password_hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        let id = doctor.id();
        self.registry
            .insert(doctor, password_hash)
            .await
            .map_err(map_registry_error)?;

        info!(doctor_id = %id, "doctor added");
        Ok(id)
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, Error> {
        self.registry.list().await.map_err(map_registry_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixturePasswordHasher, FixtureTokenService, MockDoctorRegistry};
    use crate::domain::{Address, ErrorCode};
    use rstest::{fixture, rstest};

    const ADMIN_EMAIL: &str = "admin@prescripto.example";
    const ADMIN_TOKEN: &str = "admin:admin@prescripto.example";

    #[fixture]
    fn draft() -> DoctorDraft {
        DoctorDraft {
            name: "Dr. Richard James".into(),
            email: "richard@clinic.example".into(),
            phone: "+91 98450 12345".into(),
            speciality: "Dermatologist".into(),
            degree: "MBBS".into(),
            experience: "4 Years".into(),
            fees: 50,
            about: "Skin care".into(),
            address: Address {
                line1: "17th Cross".into(),
                line2: "Richmond".into(),
            },
        }
    }

    fn service(
        registry: MockDoctorRegistry,
    ) -> DoctorOnboardingService<MockDoctorRegistry, FixturePasswordHasher> {
        DoctorOnboardingService::new(
            Authenticator::new(Arc::new(FixtureTokenService)),
            Arc::new(registry),
            Arc::new(FixturePasswordHasher),
            AdminCredentials::new(
                EmailAddress::new(ADMIN_EMAIL).expect("email"),
                Password::for_login("qwerty123").expect("password"),
            ),
        )
    }

    #[rstest]
    #[case::correct(ADMIN_EMAIL, "qwerty123", true)]
    #[case::wrong_password(ADMIN_EMAIL, "qwerty124", false)]
    #[case::longer_password(ADMIN_EMAIL, "qwerty1234", false)]
    #[case::prefix_of_password(ADMIN_EMAIL, "qwerty", false)]
    #[case::wrong_email("someone@prescripto.example", "qwerty123", false)]
    #[tokio::test]
    async fn admin_login_checks_configured_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] accepted: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("shape");
        let result = service(MockDoctorRegistry::new()).admin_login(creds).await;
        match (accepted, result) {
            (true, Ok(issued)) => assert_eq!(issued.token.expose(), ADMIN_TOKEN),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (expected, other) => panic!("expected accepted={expected}, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn add_doctor_stores_hashed_password(draft: DoctorDraft) {
        let mut registry = MockDoctorRegistry::new();
        registry
            .expect_insert()
            .withf(|doctor, hash| {
                doctor.email().as_ref() == "richard@clinic.example"
                    && hash.as_str() == "plain$doctor-pass"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        service(registry)
            .add_doctor(BearerToken::new(ADMIN_TOKEN), draft, "doctor-pass".into())
            .await
            .expect("doctor added");
    }

    #[rstest]
    #[case::missing(None, ErrorCode::Unauthorized)]
    #[case::patient(
        BearerToken::new("patient:3fa85f64-5717-4562-b3fc-2c963f66afa6"),
        ErrorCode::Forbidden
    )]
    #[tokio::test]
    async fn add_doctor_requires_admin(
        draft: DoctorDraft,
        #[case] credential: Option<BearerToken>,
        #[case] code: ErrorCode,
    ) {
        let mut registry = MockDoctorRegistry::new();
        registry.expect_insert().times(0);
        let err = service(registry)
            .add_doctor(credential, draft, "doctor-pass".into())
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), code);
    }

    #[rstest]
    #[tokio::test]
    async fn add_doctor_rejects_weak_passwords(draft: DoctorDraft) {
        let mut registry = MockDoctorRegistry::new();
        registry.expect_insert().times(0);
        let err = service(registry)
            .add_doctor(BearerToken::new(ADMIN_TOKEN), draft, "short".into())
            .await
            .expect_err("weak password");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "field": "password" })));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_doctor_email_conflicts(draft: DoctorDraft) {
        let mut registry = MockDoctorRegistry::new();
        registry.expect_insert().returning(|doctor, _| {
            Err(DoctorRegistryError::duplicate_email(
                doctor.email().as_ref(),
            ))
        });
        let err = service(registry)
            .add_doctor(BearerToken::new(ADMIN_TOKEN), draft, "doctor-pass".into())
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
