//! Patient identity and contact details.
//!
//! Values are validated on construction so services and adapters can rely on
//! the invariants documented on each type.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for user attributes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("name must not contain control characters")]
    NameInvalidCharacters,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must look like name@example.com")]
    InvalidEmail,
}

/// Validation errors for phone numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneNumberValidationError {
    #[error("phone number must not be empty")]
    Empty,
    #[error("phone number may only contain digits, spaces, dashes, dots, or parentheses")]
    InvalidCharacters,
    #[error("phone number must have between {min} and {max} digits")]
    InvalidLength { min: usize, max: usize },
    #[error("phone number must include a country code")]
    MissingCountryCode,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Human readable name interpolated into alert messages.
///
/// Stored trimmed; must be non-empty and free of control characters so the
/// SMS body stays on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    ///
    /// # Examples
    /// ```
    /// use prescripto_backend::domain::DisplayName;
    ///
    /// let name = DisplayName::new("  Asha  ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Asha");
    /// ```
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(UserValidationError::NameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lower-cased email address used as the login handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

const EMAIL_MAX: usize = 254;

impl EmailAddress {
    /// Validate and normalise an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.len() > EMAIL_MAX || trimmed.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        let domain_ok = domain.contains('.')
            && !domain.contains('@')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains("..");
        if local.is_empty() || !domain_ok {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Country calling code assumed for bare national numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "91";
const NATIONAL_NUMBER_DIGITS: usize = 10;
const E164_MIN_DIGITS: usize = 8;
const E164_MAX_DIGITS: usize = 15;

/// Phone number normalised to E.164 (`+` followed by 8–15 digits).
///
/// Separators (spaces, dashes, dots, parentheses) are dropped. A leading
/// `00` is read as the international prefix. Bare ten-digit national numbers,
/// optionally with a trunk `0`, are assumed to be Indian numbers.
///
/// # Examples
/// ```
/// use prescripto_backend::domain::PhoneNumber;
///
/// let intl = PhoneNumber::parse("+1 (555) 123-4567").expect("valid number");
/// assert_eq!(intl.as_ref(), "+15551234567");
///
/// let national = PhoneNumber::parse("98765 43210").expect("valid number");
/// assert_eq!(national.as_ref(), "+919876543210");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and normalise user input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PhoneNumberValidationError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PhoneNumberValidationError::Empty);
        }

        let (international, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for ch in rest.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(PhoneNumberValidationError::InvalidCharacters),
            }
        }

        let subscriber = if international {
            digits
        } else if let Some(stripped) = digits.strip_prefix("00") {
            stripped.to_owned()
        } else {
            national_to_international(&digits)?
        };

        if subscriber.starts_with('0') {
            return Err(PhoneNumberValidationError::MissingCountryCode);
        }
        let count = subscriber.len();
        if !(E164_MIN_DIGITS..=E164_MAX_DIGITS).contains(&count) {
            return Err(PhoneNumberValidationError::InvalidLength {
                min: E164_MIN_DIGITS,
                max: E164_MAX_DIGITS,
            });
        }

        Ok(Self(format!("+{subscriber}")))
    }
}

fn national_to_international(digits: &str) -> Result<String, PhoneNumberValidationError> {
    let national = match digits.strip_prefix('0') {
        Some(rest) if rest.len() == NATIONAL_NUMBER_DIGITS => rest,
        _ => digits,
    };
    if national.len() == NATIONAL_NUMBER_DIGITS {
        Ok(format!("{DEFAULT_COUNTRY_CODE}{national}"))
    } else {
        Err(PhoneNumberValidationError::MissingCountryCode)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Patient profile as held by the user directory.
///
/// ## Invariants
/// - `caregiver_phone` is the only destination an emergency alert may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "Asha")]
    name: DisplayName,
    #[schema(value_type = String, example = "asha@example.com")]
    email: EmailAddress,
    #[schema(value_type = String, example = "+919876543210")]
    phone: PhoneNumber,
    #[schema(value_type = Option<String>, example = "+15551234567")]
    #[serde(rename = "doctorPhone", skip_serializing_if = "Option::is_none")]
    caregiver_phone: Option<PhoneNumber>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        name: DisplayName,
        email: EmailAddress,
        phone: PhoneNumber,
        caregiver_phone: Option<PhoneNumber>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            caregiver_phone,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name used in alert messages.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The patient's own number.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Number of the associated caregiver (the patient's doctor), if on file.
    pub fn caregiver_phone(&self) -> Option<&PhoneNumber> {
        self.caregiver_phone.as_ref()
    }

    /// Return a copy with the caregiver number replaced.
    #[must_use]
    pub fn with_caregiver_phone(mut self, phone: Option<PhoneNumber>) -> Self {
        self.caregiver_phone = phone;
        self
    }
}
