// Shared transport configuration for building the reqwest::Client.
//
// TLS, timeout, user agent and the shape of the auth header all live here
// so the executor only deals with request mechanics.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("foodie/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (local development backends).
    DangerAcceptInvalid,
}

/// Which header carries the session token, and how its value is built.
///
/// The backend reads a bearer-style token; the header name and scheme are
/// configurable because deployments differ (`Authorization: Bearer <t>`
/// versus a custom header holding the raw token).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeader {
    pub name: String,
    /// Prefix placed before the token. Empty means the raw token is sent.
    pub scheme: String,
}

impl Default for AuthHeader {
    fn default() -> Self {
        Self {
            name: reqwest::header::AUTHORIZATION.as_str().to_owned(),
            scheme: "Bearer".into(),
        }
    }
}

impl AuthHeader {
    /// Header value for the given token.
    pub fn value_for(&self, token: &str) -> String {
        if self.scheme.is_empty() {
            token.to_owned()
        } else {
            format!("{} {token}", self.scheme)
        }
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub auth_header: AuthHeader,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            auth_header: AuthHeader::default(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
