//! Explicit session handed to the trigger.

use std::fmt;

use url::Url;
use zeroize::Zeroizing;

use crate::TriggerError;

/// Path of the emergency endpoint relative to the backend origin.
pub const EMERGENCY_PATH: &str = "api/user/emergency";

/// Backend location and credential of the signed-in patient.
#[derive(Clone)]
pub struct Session {
    backend_url: Url,
    token: Zeroizing<String>,
}

impl Session {
    /// Build a session from the backend origin and a bearer token.
    ///
    /// # Errors
    /// Returns [`TriggerError`] when the URL is invalid or the token blank.
    ///
    /// # Examples
    /// ```
    /// use emergency_trigger::Session;
    ///
    /// let session = Session::new("http://localhost:8080", "token").expect("session");
    /// assert_eq!(
    ///     session.emergency_endpoint().expect("endpoint").as_str(),
    ///     "http://localhost:8080/api/user/emergency"
    /// );
    /// ```
    pub fn new(backend_url: &str, token: impl Into<String>) -> Result<Self, TriggerError> {
        let mut url = Url::parse(backend_url.trim()).map_err(|source| {
            TriggerError::InvalidBackendUrl {
                url: backend_url.to_owned(),
                source,
            }
        })?;
        if url.cannot_be_a_base() {
            return Err(TriggerError::UnsupportedBackendUrl {
                url: backend_url.to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        let token = Zeroizing::new(token.into().trim().to_owned());
        if token.is_empty() {
            return Err(TriggerError::EmptyToken);
        }
        Ok(Self {
            backend_url: url,
            token,
        })
    }

    /// Absolute URL of the emergency endpoint.
    ///
    /// # Errors
    /// Returns [`TriggerError::InvalidBackendUrl`] if the join fails.
    pub fn emergency_endpoint(&self) -> Result<Url, TriggerError> {
        self.backend_url
            .join(EMERGENCY_PATH)
            .map_err(|source| TriggerError::InvalidBackendUrl {
                url: self.backend_url.to_string(),
                source,
            })
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("backend_url", &self.backend_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080", "http://localhost:8080/api/user/emergency")]
    #[case("http://localhost:8080/", "http://localhost:8080/api/user/emergency")]
    #[case("https://clinic.example/backend", "https://clinic.example/backend/api/user/emergency")]
    fn endpoint_is_resolved_under_the_backend(#[case] base: &str, #[case] expected: &str) {
        let session = Session::new(base, "token").expect("session");
        assert_eq!(session.emergency_endpoint().expect("endpoint").as_str(), expected);
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:doctor@example.com")]
    fn rejects_unusable_urls(#[case] base: &str) {
        assert!(Session::new(base, "token").is_err());
    }

    #[test]
    fn rejects_blank_tokens() {
        assert!(matches!(
            Session::new("http://localhost:8080", "  "),
            Err(TriggerError::EmptyToken)
        ));
    }

    #[test]
    fn debug_hides_the_token() {
        let session = Session::new("http://localhost:8080", "very-secret").expect("session");
        assert!(!format!("{session:?}").contains("very-secret"));
    }
}
