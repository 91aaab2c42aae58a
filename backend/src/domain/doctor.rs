//! Doctor profiles created by administrators and listed to patients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    DisplayName, EmailAddress, PhoneNumber, PhoneNumberValidationError, UserValidationError,
};

/// Validation failures for a doctor onboarding draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DoctorValidationError {
    #[error("name: {0}")]
    Name(UserValidationError),
    #[error("email: {0}")]
    Email(UserValidationError),
    #[error("phone: {0}")]
    Phone(PhoneNumberValidationError),
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    #[error("unknown speciality: {value}")]
    UnknownSpeciality { value: String },
    #[error("fees must not be negative")]
    NegativeFees,
    #[error("fees must be at most {max}")]
    FeesTooLarge { max: u32 },
}

impl DoctorValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
            Self::Blank { field } => *field,
            Self::UnknownSpeciality { .. } => "speciality",
            Self::NegativeFees | Self::FeesTooLarge { .. } => "fees",
        }
    }
}

/// Stable doctor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(Uuid);

impl DoctorId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Medical speciality offered on the booking client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Speciality {
    #[serde(rename = "General physician")]
    GeneralPhysician,
    Gynecologist,
    Dermatologist,
    Pediatricians,
    Neurologist,
    Gastroenterologist,
}

impl Speciality {
    /// Every speciality, in display order.
    pub const ALL: [Self; 6] = [
        Self::GeneralPhysician,
        Self::Gynecologist,
        Self::Dermatologist,
        Self::Pediatricians,
        Self::Neurologist,
        Self::Gastroenterologist,
    ];

    /// Label shown to patients.
    pub fn label(self) -> &'static str {
        match self {
            Self::GeneralPhysician => "General physician",
            Self::Gynecologist => "Gynecologist",
            Self::Dermatologist => "Dermatologist",
            Self::Pediatricians => "Pediatricians",
            Self::Neurologist => "Neurologist",
            Self::Gastroenterologist => "Gastroenterologist",
        }
    }
}

impl FromStr for Speciality {
    type Err = DoctorValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|speciality| speciality.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DoctorValidationError::UnknownSpeciality {
                value: wanted.to_owned(),
            })
    }
}

/// Practice address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub line1: String,
    pub line2: String,
}

/// Raw onboarding input as submitted by an administrator.
#[derive(Debug, Clone)]
pub struct DoctorDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub fees: i64,
    pub about: String,
    pub address: Address,
}

/// Validated doctor profile.
///
/// New doctors start out available for booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    id: DoctorId,
    name: DisplayName,
    email: EmailAddress,
    phone: PhoneNumber,
    speciality: Speciality,
    degree: String,
    experience: String,
    fees: u32,
    about: String,
    address: Address,
    available: bool,
}

fn required(field: &'static str, value: &str) -> Result<String, DoctorValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DoctorValidationError::Blank { field })
    } else {
        Ok(trimmed.to_owned())
    }
}

impl Doctor {
    /// Validate a draft and assign it `id`.
    ///
    /// # Examples
    /// ```
    /// use prescripto_backend::domain::{Address, Doctor, DoctorDraft, DoctorId, Speciality};
    ///
    /// let draft = DoctorDraft {
    ///     name: "Dr. Ravi Kumar".into(),
    ///     email: "ravi@clinic.example".into(),
    ///     phone: "+91 98765 43210".into(),
    ///     speciality: "Neurologist".into(),
    ///     degree: "MBBS".into(),
    ///     experience: "4 Years".into(),
    ///     fees: 500,
    ///     about: "Headache clinic".into(),
    ///     address: Address { line1: "12 MG Road".into(), line2: "Bengaluru".into() },
    /// };
    /// let doctor = Doctor::try_from_draft(DoctorId::random(), draft).expect("valid draft");
    /// assert_eq!(doctor.speciality(), Speciality::Neurologist);
    /// assert_eq!(doctor.phone().as_ref(), "+919876543210");
    /// ```
    pub fn try_from_draft(id: DoctorId, draft: DoctorDraft) -> Result<Self, DoctorValidationError> {
        let name = DisplayName::new(&draft.name).map_err(DoctorValidationError::Name)?;
        let email = EmailAddress::new(&draft.email).map_err(DoctorValidationError::Email)?;
        let phone = PhoneNumber::parse(&draft.phone).map_err(DoctorValidationError::Phone)?;
        let speciality = draft.speciality.parse::<Speciality>()?;
        let degree = required("degree", &draft.degree)?;
        let experience = required("experience", &draft.experience)?;
        let about = required("about", &draft.about)?;
        let address = Address {
            line1: required("address.line1", &draft.address.line1)?,
            line2: required("address.line2", &draft.address.line2)?,
        };
        if draft.fees < 0 {
            return Err(DoctorValidationError::NegativeFees);
        }
        let fees = u32::try_from(draft.fees)
            .map_err(|_| DoctorValidationError::FeesTooLarge { max: u32::MAX })?;

        Ok(Self {
            id,
            name,
            email,
            phone,
            speciality,
            degree,
            experience,
            fees,
            about,
            address,
            available: true,
        })
    }

    pub fn id(&self) -> DoctorId {
        self.id
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Login email; never shown on public listings.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn speciality(&self) -> Speciality {
        self.speciality
    }

    pub fn degree(&self) -> &str {
        &self.degree
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }

    /// Appointment fee in whole rupees.
    pub fn fees(&self) -> u32 {
        self.fees
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> DoctorDraft {
        DoctorDraft {
            name: "Dr. Meera Iyer".into(),
            email: "Meera@Clinic.example".into(),
            phone: "98765 43210".into(),
            speciality: "general physician".into(),
            degree: "MBBS".into(),
            experience: "1 Year".into(),
            fees: 300,
            about: "Family medicine".into(),
            address: Address {
                line1: "4 Residency Road".into(),
                line2: "Bengaluru".into(),
            },
        }
    }

    #[rstest]
    fn valid_draft_is_normalised(draft: DoctorDraft) {
        let doctor = Doctor::try_from_draft(DoctorId::random(), draft).expect("valid draft");
        assert_eq!(doctor.email().as_ref(), "meera@clinic.example");
        assert_eq!(doctor.speciality(), Speciality::GeneralPhysician);
        assert_eq!(doctor.fees(), 300);
        assert!(doctor.available());
    }

    #[rstest]
    #[case::blank_degree(|d: &mut DoctorDraft| d.degree = "  ".into(), "degree")]
    #[case::blank_about(|d: &mut DoctorDraft| d.about = String::new(), "about")]
    #[case::blank_line2(|d: &mut DoctorDraft| d.address.line2 = String::new(), "address.line2")]
    #[case::bad_email(|d: &mut DoctorDraft| d.email = "nobody".into(), "email")]
    #[case::bad_phone(|d: &mut DoctorDraft| d.phone = "12".into(), "phone")]
    #[case::bad_speciality(|d: &mut DoctorDraft| d.speciality = "Astrologer".into(), "speciality")]
    #[case::negative_fees(|d: &mut DoctorDraft| d.fees = -1, "fees")]
    #[case::huge_fees(|d: &mut DoctorDraft| d.fees = i64::from(u32::MAX) + 1, "fees")]
    fn invalid_drafts_name_the_offending_field(
        mut draft: DoctorDraft,
        #[case] mutate: fn(&mut DoctorDraft),
        #[case] field: &str,
    ) {
        mutate(&mut draft);
        let err = Doctor::try_from_draft(DoctorId::random(), draft).expect_err("invalid draft");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn speciality_labels_round_trip_through_serde() {
        for speciality in Speciality::ALL {
            let json = serde_json::to_value(speciality).expect("serialise");
            assert_eq!(json, serde_json::json!(speciality.label()));
        }
    }
}
