//! Authentication primitives: bearer credentials, principals, and login input.
//!
//! Inbound adapters parse raw strings into these types before talking to a
//! port, so services only ever see validated values.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::{EmailAddress, UserId, UserValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Opaque bearer credential presented with each authenticated request.
///
/// ## Invariants
/// - Non-empty once trimmed; stored trimmed.
///
/// The credential is never printed by `Debug` so it cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Construct a token from raw text, returning `None` when blank.
    ///
    /// # Examples
    /// ```
    /// use prescripto_backend::domain::BearerToken;
    ///
    /// assert!(BearerToken::new("  ").is_none());
    /// let token = BearerToken::new(" abc.def.ghi ").expect("non-empty");
    /// assert_eq!(token.expose(), "abc.def.ghi");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(Zeroizing::new(trimmed.to_owned())))
        }
    }

    /// Reveal the credential text for verification or transmission.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// Role carried by an issued credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A registered patient using the booking client.
    Patient,
    /// An administrator using the management client.
    Admin,
}

impl Role {
    /// Stable claim value for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Admin => "admin",
        }
    }

    /// Parse a claim value produced by [`Role::as_str`].
    pub fn from_claim(value: &str) -> Option<Self> {
        match value {
            "patient" => Some(Self::Patient),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity a verified bearer credential resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// A patient account in the user directory.
    Patient(UserId),
    /// The configured administrator.
    Admin(EmailAddress),
}

impl Principal {
    /// Role of this principal.
    pub fn role(&self) -> Role {
        match self {
            Self::Patient(_) => Role::Patient,
            Self::Admin(_) => Role::Admin,
        }
    }

    /// Subject claim identifying this principal.
    pub fn subject(&self) -> String {
        match self {
            Self::Patient(id) => id.to_string(),
            Self::Admin(email) => email.to_string(),
        }
    }
}

/// A credential freshly issued to a principal.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Credential to hand to the client.
    pub token: BearerToken,
    /// Instant after which verification fails.
    pub expires_at: DateTime<Utc>,
}

/// Validation failures for login and registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email was missing or malformed.
    #[error(transparent)]
    Email(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN_LEN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Plain-text password held only for as long as hashing or verification takes.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept any non-empty password (used at login).
    pub fn for_login(raw: &str) -> Result<Self, CredentialsValidationError> {
        if raw.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Enforce the registration length policy.
    pub fn for_registration(raw: &str) -> Result<Self, CredentialsValidationError> {
        let password = Self::for_login(raw)?;
        if raw.chars().count() < PASSWORD_MIN_LEN {
            return Err(CredentialsValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(password)
    }

    /// Reveal the password for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Encoded password hash (PHC string) as stored by directories.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher adapter.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use prescripto_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Asha@Example.com ", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "asha@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password::for_login(password)?,
        })
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}
