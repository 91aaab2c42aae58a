//! Error types for the emergency trigger.

use thiserror::Error;

/// Failures while setting up a session or the HTTP client.
///
/// Request outcomes are never errors; they become a [`crate::Notice`].
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The backend URL could not be parsed.
    #[error("invalid backend URL '{url}': {source}")]
    InvalidBackendUrl {
        /// The URL that failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The backend URL cannot carry a path (for example `mailto:`).
    #[error("backend URL '{url}' cannot be used as a base")]
    UnsupportedBackendUrl {
        /// The rejected URL.
        url: String,
    },

    /// The session credential was blank.
    #[error("session token must not be empty")]
    EmptyToken,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
