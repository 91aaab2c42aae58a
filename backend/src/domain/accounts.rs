//! Patient registration, login, and caregiver number maintenance.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::authenticator::Authenticator;
use super::ports::{
    AccountCommand, AccountSession, PasswordHashError, PasswordHasher, TokenError,
    UserDirectory, UserDirectoryError, UserRecord,
};
use super::{
    BearerToken, CredentialsValidationError, DisplayName, EmailAddress, Error, LoginCredentials,
    Password, PasswordHash, PhoneNumber, PhoneNumberValidationError, Principal, Role, User,
    UserId, UserValidationError,
};

/// Validation failures for a registration request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("{0}")]
    Name(UserValidationError),
    #[error("{0}")]
    Email(UserValidationError),
    #[error("{0}")]
    Password(CredentialsValidationError),
    #[error("{0}")]
    Phone(PhoneNumberValidationError),
    #[error("doctor {0}")]
    DoctorPhone(PhoneNumberValidationError),
}

impl RegistrationValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::Password(_) => "password",
            Self::Phone(_) => "phone",
            Self::DoctorPhone(_) => "doctorPhone",
        }
    }
}

/// Validated sign-up input.
#[derive(Debug, Clone)]
pub struct Registration {
    name: DisplayName,
    email: EmailAddress,
    password: Password,
    phone: PhoneNumber,
    caregiver_phone: Option<PhoneNumber>,
}

impl Registration {
    /// Validate raw sign-up fields. A blank `doctor_phone` counts as absent.
    ///
    /// # Examples
    /// ```
    /// use prescripto_backend::domain::Registration;
    ///
    /// let registration = Registration::try_from_parts(
    ///     "Asha",
    ///     "asha@example.com",
    ///     "correct horse",
    ///     "98765 43210",
    ///     Some(""),
    /// )
    /// .expect("valid registration");
    /// assert!(registration.caregiver_phone().is_none());
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        phone: &str,
        doctor_phone: Option<&str>,
    ) -> Result<Self, RegistrationValidationError> {
        let caregiver_phone = doctor_phone
            .filter(|raw| !raw.trim().is_empty())
            .map(PhoneNumber::parse)
            .transpose()
            .map_err(RegistrationValidationError::DoctorPhone)?;
        Ok(Self {
            name: DisplayName::new(name).map_err(RegistrationValidationError::Name)?,
            email: EmailAddress::new(email).map_err(RegistrationValidationError::Email)?,
            password: Password::for_registration(password)
                .map_err(RegistrationValidationError::Password)?,
            phone: PhoneNumber::parse(phone).map_err(RegistrationValidationError::Phone)?,
            caregiver_phone,
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn caregiver_phone(&self) -> Option<&PhoneNumber> {
        self.caregiver_phone.as_ref()
    }
}

/// Map registration validation failures to an invalid-request error naming
/// the field.
pub fn registration_validation_error(err: RegistrationValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

pub(crate) fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
        UserDirectoryError::DuplicateEmail { .. } => Error::conflict("email already registered"),
        UserDirectoryError::UnknownUser { .. } => Error::not_found("user not found"),
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

pub(crate) fn map_token_error(error: TokenError) -> Error {
    Error::internal(format!("credential issuance failed: {error}"))
}

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Account service implementing the patient account driving port.
#[derive(Clone)]
pub struct AccountService<D, H> {
    authenticator: Authenticator,
    directory: Arc<D>,
    hasher: Arc<H>,
    /// Hash verified on unknown emails so they cost as much as a wrong password.
    decoy: Arc<OnceCell<PasswordHash>>,
}

impl<D, H> AccountService<D, H> {
    /// Create a service from its collaborators.
    pub fn new(authenticator: Authenticator, directory: Arc<D>, hasher: Arc<H>) -> Self {
        Self {
            authenticator,
            directory,
            hasher,
            decoy: Arc::new(OnceCell::new()),
        }
    }

    fn session_for(&self, user_id: UserId) -> Result<AccountSession, Error> {
        let token = self
            .authenticator
            .tokens()
            .issue(&Principal::Patient(user_id))
            .map_err(map_token_error)?;
        Ok(AccountSession { user_id, token })
    }
}

impl<D, H: PasswordHasher> AccountService<D, H> {
    /// Spend one verification on a throwaway hash. The outcome is ignored.
    async fn verify_decoy(&self, password: &Password) {
        let decoy = match self
            .decoy
            .get_or_try_init(|| self.hasher.hash(password))
            .await
        {
            Ok(decoy) => decoy,
            Err(error) => {
                warn!(error = %error, "decoy password hash unavailable");
                return;
            }
        };
        if let Err(error) = self.hasher.verify(password, decoy).await {
            warn!(error = %error, "decoy password verification failed");
        }
    }
}

#[async_trait]
impl<D, H> AccountCommand for AccountService<D, H>
where
    D: UserDirectory,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<AccountSession, Error> {
        let Registration {
            name,
            email,
            password,
            phone,
            caregiver_phone,
        } = registration;

        if self
            .directory
            .find_by_email(&email)
            .await
            .map_err(map_directory_error)?
            .is_some()
        {
            return Err(Error::conflict("email already registered"));
        }

        let password_hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        let user_id = UserId::random();
        let user = User::new(user_id, name, email, phone, caregiver_phone);
        self.directory
            .insert(UserRecord {
                user,
                password_hash,
            })
            .await
            .map_err(map_directory_error)?;

        info!(user_id = %user_id, "patient registered");
        self.session_for(user_id)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccountSession, Error> {
        let Some(record) = self
            .directory
            .find_by_email(credentials.email())
            .await
            .map_err(map_directory_error)?
        else {
            self.verify_decoy(credentials.password()).await;
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.session_for(*record.user.id())
    }

    async fn set_doctor_phone(
        &self,
        credential: Option<BearerToken>,
        phone: PhoneNumber,
    ) -> Result<User, Error> {
        let principal = self
            .authenticator
            .require(credential.as_ref(), Role::Patient)?;
        let Principal::Patient(user_id) = principal else {
            return Err(Error::forbidden("patient credential required"));
        };
        let user = self
            .directory
            .set_caregiver_phone(&user_id, phone)
            .await
            .map_err(map_directory_error)?;
        info!(user_id = %user_id, "caregiver number updated");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
