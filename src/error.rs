//! Error types shared by the token provider, the HTTP client and the services.
//!
//! The taxonomy keeps "expected" precondition failures (nobody is signed in)
//! apart from transport failures, so callers can branch on the variant
//! instead of matching on message text.

use thiserror::Error;

/// Failures while resolving an access token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No account is signed in with the identity provider.
    #[error("No active account. Please sign in.")]
    NoAccount,

    /// Silent acquisition failed and the interactive fallback failed too.
    #[error("Token acquisition failed: {interactive} (silent attempt: {silent})")]
    Interaction { silent: String, interactive: String },
}

/// Errors returned by [`ApiClient`](crate::http::ApiClient) and every service on top of it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The token provider could not produce a bearer token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The backend answered with a non-2xx status.
    ///
    /// `message` comes from the problem-details body (`title`, then `detail`)
    /// or falls back to `HTTP <status>: <reason>`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, refused connection, TLS, offline).
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx body could not be decoded into the requested type.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// The backend call panicked or was cancelled before it produced a result.
    #[error("Backend task failed: {0}")]
    Task(String),
}

impl ApiError {
    /// True for failures that only a user action (signing in) can resolve.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ApiError::Auth(AuthError::NoAccount))
    }

    /// True when the failure happened below HTTP.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for ApiError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        ApiError::Encode(err.to_string())
    }
}

/// Configuration that could not be loaded or does not make sense.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or a value has the wrong shape.
    #[error(transparent)]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
