// ── Runtime client configuration ──
//
// Describes *how* to reach the backend. Never touches disk: the config
// crate or a binary builds a `ClientConfig` and hands it in.

use std::time::Duration;

use url::Url;

use foodie_api::{AuthHeader, TlsMode, TransportConfig};

use crate::resource::ResponseOrdering;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://api.organicfoodie.in/api`.
    pub base_url: Url,
    pub tls: TlsMode,
    pub timeout: Duration,
    pub auth_header: AuthHeader,
    pub ordering: ResponseOrdering,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
            auth_header: AuthHeader::default(),
            ordering: ResponseOrdering::default(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
            auth_header: self.auth_header.clone(),
        }
    }
}
