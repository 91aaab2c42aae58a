//! HS256 JWT implementation of the token service port.
//!
//! Tokens carry `sub`, `role`, `iat`, and `exp`. Expiry is checked against
//! the injected clock rather than the system time so tests can move time.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{BearerToken, EmailAddress, IssuedToken, Principal, Role, UserId};

/// Minimum signing secret length accepted in release builds.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Token service signing credentials with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service from the signing secret, token lifetime, and clock.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation
    }
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: principal.subject(),
            role: principal.role().as_str().to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let raw = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;
        let token = BearerToken::new(raw).ok_or_else(|| TokenError::signing("empty token"))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &BearerToken) -> Result<Principal, TokenError> {
        let data = decode::<Claims>(token.expose(), &self.decoding, &Self::validation())
            .map_err(|err| TokenError::malformed(err.to_string()))?;
        let claims = data.claims;

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::malformed("expiry out of range"))?;
        if expires_at <= self.clock.utc() {
            return Err(TokenError::expired());
        }

        match Role::from_claim(&claims.role) {
            Some(Role::Patient) => UserId::new(&claims.sub)
                .map(Principal::Patient)
                .map_err(|err| TokenError::malformed(err.to_string())),
            Some(Role::Admin) => EmailAddress::new(&claims.sub)
                .map(Principal::Admin)
                .map_err(|err| TokenError::malformed(err.to_string())),
            None => Err(TokenError::unknown_role(claims.role)),
        }
    }
}
