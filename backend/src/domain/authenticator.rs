//! Resolves presented bearer credentials to principals and enforces roles.

use std::sync::Arc;

use tracing::debug;

use super::ports::{TokenError, TokenService};
use super::{BearerToken, Error, Principal, Role};

/// Reasons a caller is turned away before any side effect happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    /// No credential, or one that does not verify.
    #[error("{0}")]
    Unauthenticated(&'static str),
    /// A valid credential for the wrong role.
    #[error("{0}")]
    WrongRole(&'static str),
}

impl From<AccessDenied> for Error {
    fn from(value: AccessDenied) -> Self {
        match value {
            AccessDenied::Unauthenticated(message) => Error::unauthorized(message),
            AccessDenied::WrongRole(message) => Error::forbidden(message),
        }
    }
}

/// Credential gate shared by the domain services.
#[derive(Clone)]
pub struct Authenticator {
    tokens: Arc<dyn TokenService>,
}

impl Authenticator {
    /// Wrap a token service.
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    /// Verify `credential` and require the principal to hold `role`.
    ///
    /// Verification failures are logged at debug level without the
    /// credential itself.
    pub fn require(
        &self,
        credential: Option<&BearerToken>,
        role: Role,
    ) -> Result<Principal, AccessDenied> {
        let token =
            credential.ok_or(AccessDenied::Unauthenticated("missing bearer credential"))?;
        let principal = self.tokens.verify(token).map_err(|err| {
            debug!(error = %err, "bearer credential rejected");
            match err {
                TokenError::Expired => AccessDenied::Unauthenticated("credential expired"),
                _ => AccessDenied::Unauthenticated("invalid bearer credential"),
            }
        })?;
        if principal.role() != role {
            return Err(AccessDenied::WrongRole(match role {
                Role::Patient => "patient credential required",
                Role::Admin => "admin credential required",
            }));
        }
        Ok(principal)
    }

    /// Token service used for issuance.
    pub fn tokens(&self) -> &dyn TokenService {
        self.tokens.as_ref()
    }
}
