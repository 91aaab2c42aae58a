//! Outcome banner shown to the patient.

use std::fmt;

/// Banner text shown when the backend accepted the alert.
pub const SUCCESS_NOTICE: &str = "🚨 Emergency alert sent to doctor.";

/// Banner text shown when no server message is available.
pub const GENERIC_FAILURE_NOTICE: &str = "Failed to send emergency alert.";

/// Result of one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The backend reported that the alert was sent.
    Success(String),
    /// The alert was not sent; carries the server's message when it gave one.
    Failure(String),
}

impl Notice {
    pub(crate) fn sent() -> Self {
        Self::Success(SUCCESS_NOTICE.to_owned())
    }

    /// Failure notice preferring a non-blank server message.
    pub(crate) fn failed(server_message: Option<String>) -> Self {
        let message = server_message
            .map(|message| message.trim().to_owned())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_NOTICE.to_owned());
        Self::Failure(message)
    }

    /// Whether the alert was sent.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Banner text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
