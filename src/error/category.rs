//! Error category classification.
//!
//! Categories drive retry affordances and the wording shown to the user,
//! independent of which layer produced the error.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport-level failure (connection refused, DNS, timeout).
    Network,

    /// Authentication problems (bad credentials, expired session).
    Auth,

    /// The backend answered with a 5xx or an unreadable payload.
    Server,

    /// The backend rejected the request (4xx other than auth).
    Client,

    /// User input was rejected before reaching the network.
    User,

    /// Local filesystem or OS failure.
    System,

    /// Invalid or missing configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested recovery action shown next to a retry affordance.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection and pull to refresh",
            ErrorCategory::Auth => "Sign in again",
            ErrorCategory::Server => "The server is having trouble. Try again shortly",
            ErrorCategory::Client => "The request was rejected. Reload and try again",
            ErrorCategory::User => "Check the highlighted fields",
            ErrorCategory::System => "Check storage permissions and free space",
            ErrorCategory::Configuration => "Check the API URLs in your configuration",
        }
    }

    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorCategory::Auth,
            500..=599 => ErrorCategory::Server,
            _ => ErrorCategory::Client,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
