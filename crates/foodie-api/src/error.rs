use thiserror::Error;

/// Top-level error type for the `foodie-api` crate.
///
/// Every failure of a request against the backend lands in exactly one
/// variant, regardless of which endpoint issued it. `foodie-core` maps these
/// into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The request never reached the server or the response never came back
    /// (connection refused, DNS failure, timeout, reset).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Base URL or request path could not be turned into a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request path that would not address the resource it names
    /// (dot segments, a query or a fragment).
    #[error("invalid request path: {path}")]
    InvalidPath { path: String },

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// The server answered with a status outside 2xx. The body is kept as
    /// raw text since error bodies are not guaranteed to be JSON.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx response whose body was not the expected JSON.
    #[error("decode error: {message}")]
    Decode { message: String, body: String },

    // ── Request ─────────────────────────────────────────────────────
    /// The request payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl Error {
    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server answered 401 or 403.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this is a transient error. Nothing in this crate
    /// retries; callers may use this to decide whether to offer a retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_classification() {
        let err = Error::Http {
            status: 404,
            body: "wishlist not found".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "HTTP 404: wishlist not found");
    }

    #[test]
    fn gateway_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn decode_error_has_no_status() {
        let err = Error::Decode {
            message: "expected value".into(),
            body: "<html>".into(),
        };
        assert_eq!(err.status(), None);
    }
}
