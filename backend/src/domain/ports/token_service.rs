//! Driven port for issuing and verifying bearer credentials.

use chrono::{Duration, Utc};

use crate::domain::{BearerToken, EmailAddress, IssuedToken, Principal, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised while issuing or verifying credentials.
    pub enum TokenError {
        /// The credential could not be parsed or its signature is wrong.
        Malformed { message: String } => "credential malformed: {message}",
        /// The credential is past its expiry.
        Expired => "credential expired",
        /// The credential names a role this service does not recognise.
        UnknownRole { role: String } => "credential carries unknown role: {role}",
        /// Signing a new credential failed.
        Signing { message: String } => "credential signing failed: {message}",
    }
}

/// Port for credential issuance and verification.
///
/// Credentials are self-contained: verification needs no server-side
/// session store.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a fresh credential for `principal`.
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError>;

    /// Resolve a presented credential to the principal it was issued for.
    fn verify(&self, token: &BearerToken) -> Result<Principal, TokenError>;
}

/// Fixture token service using readable `role:subject` credentials.
///
/// Only suitable for tests and local tooling: the credentials are unsigned.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenService;

impl TokenService for FixtureTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        let raw = format!("{}:{}", principal.role(), principal.subject());
        let token = BearerToken::new(raw).ok_or_else(|| TokenError::signing("empty subject"))?;
        Ok(IssuedToken {
            token,
            expires_at: Utc::now() + Duration::days(1),
        })
    }

    fn verify(&self, token: &BearerToken) -> Result<Principal, TokenError> {
        let (role, subject) = token
            .expose()
            .split_once(':')
            .ok_or_else(|| TokenError::malformed("missing role prefix"))?;
        match role {
            "patient" => UserId::new(subject)
                .map(Principal::Patient)
                .map_err(|err| TokenError::malformed(err.to_string())),
            "admin" => EmailAddress::new(subject)
                .map(Principal::Admin)
                .map_err(|err| TokenError::malformed(err.to_string())),
            other => Err(TokenError::unknown_role(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fixture_tokens_round_trip_patients() {
        let id = UserId::random();
        let issued = FixtureTokenService
            .issue(&Principal::Patient(id))
            .expect("issue");
        assert_eq!(
            FixtureTokenService.verify(&issued.token).expect("verify"),
            Principal::Patient(id)
        );
    }

    #[rstest]
    #[case("garbage")]
    #[case("patient:not-a-uuid")]
    #[case("doctor:someone")]
    fn fixture_rejects_unrecognised_tokens(#[case] raw: &str) {
        let token = BearerToken::new(raw).expect("non-empty");
        assert!(FixtureTokenService.verify(&token).is_err());
    }
}
