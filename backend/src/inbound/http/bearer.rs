//! Bearer credential extraction.
//!
//! Handlers receive the raw credential, if any, and hand it to the domain
//! service, which decides whether it is acceptable. Extraction itself never
//! fails.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::BearerToken;

/// Header carrying the patient credential from older web clients.
pub const LEGACY_PATIENT_HEADER: &str = "token";
/// Header carrying the administrator credential from older admin clients.
pub const LEGACY_ADMIN_HEADER: &str = "atoken";

/// Credential presented with a request, if any.
#[derive(Debug, Clone)]
pub struct BearerCredential(Option<BearerToken>);

impl BearerCredential {
    /// Unwrap into the optional token.
    pub fn into_inner(self) -> Option<BearerToken> {
        self.0
    }
}

fn from_authorization(headers: &HeaderMap) -> Option<BearerToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    BearerToken::new(token)
}

fn from_legacy_headers(headers: &HeaderMap) -> Option<BearerToken> {
    [LEGACY_PATIENT_HEADER, LEGACY_ADMIN_HEADER]
        .into_iter()
        .filter_map(|name| headers.get(name)?.to_str().ok())
        .find_map(BearerToken::new)
}

impl FromRequest for BearerCredential {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let headers = req.headers();
        let token = if headers.contains_key(AUTHORIZATION) {
            from_authorization(headers)
        } else {
            from_legacy_headers(headers)
        };
        ready(Ok(Self(token)))
    }
}
