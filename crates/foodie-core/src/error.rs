// ── Core error types ──
//
// The uniform failure taxonomy handed to UI layers. Transport details are
// flattened into owned strings so errors are `Clone` and can be kept as a
// client's "last error" as well as returned to the caller.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Session ──────────────────────────────────────────────────────
    /// A mutation was refused locally because the session has no user id.
    /// No request was sent.
    #[error("Not signed in: the current session has no user id")]
    NotAuthenticated,

    // ── Transport ────────────────────────────────────────────────────
    /// The request never reached the server or the response never came back.
    #[error("Network error: {reason}")]
    Network { reason: String, timed_out: bool },

    /// The server answered outside 2xx. `body` is the raw response text.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx response that did not have the expected shape.
    #[error("Malformed response: {message}")]
    Decode { message: String },

    // ── Operation ────────────────────────────────────────────────────
    /// The server answered 2xx but reported the operation as unsuccessful.
    #[error("Rejected by server: {message}")]
    Rejected { message: String },

    /// A newer response had already been applied to the mirror, so this
    /// one was discarded.
    #[error("Response to request #{issued} discarded: request #{applied} already applied")]
    Superseded { issued: u64, applied: u64 },

    #[error("{resource} '{id}' not found in the current snapshot")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Stable machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::Network { .. } => "network_error",
            Self::Http { .. } => "http_error",
            Self::Decode { .. } => "decode_error",
            Self::Rejected { .. } => "rejected",
            Self::Superseded { .. } => "superseded",
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation",
            Self::Config { .. } => "config",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<foodie_api::Error> for CoreError {
    fn from(err: foodie_api::Error) -> Self {
        match err {
            foodie_api::Error::Network(e) => CoreError::Network {
                timed_out: e.is_timeout(),
                reason: e.to_string(),
            },
            foodie_api::Error::Http { status, body } => CoreError::Http { status, body },
            foodie_api::Error::Decode { message, body: _ } => CoreError::Decode { message },
            foodie_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            foodie_api::Error::InvalidPath { path } => CoreError::Validation {
                message: format!("identifier does not form a valid request path: {path}"),
            },
            foodie_api::Error::Tls(message) => CoreError::Config { message },
            foodie_api::Error::Serialization(e) => CoreError::Validation {
                message: e.to_string(),
            },
        }
    }
}
