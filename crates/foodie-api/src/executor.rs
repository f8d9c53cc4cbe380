// HTTP request executor
//
// Wraps `reqwest::Client` with base-URL joining, session-derived auth
// headers and outcome classification. Endpoint modules only describe
// requests as `ApiRequest` values; this module turns them into round-trips.

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::session::SessionStore;
use crate::transport::{AuthHeader, TransportConfig};

/// A request against the backend, described as plain data.
///
/// Built by the endpoint modules, executed by [`HttpExecutor::send`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

/// Issues requests to one fixed backend.
///
/// Cheap to clone (the inner `reqwest::Client` is reference-counted). The
/// session is read on every call, so a login or logout through the shared
/// [`SessionStore`] takes effect on the next request.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    http: reqwest::Client,
    base_url: String,
    auth_header: AuthHeader,
    session: SessionStore,
}

impl HttpExecutor {
    /// Create an executor from a `TransportConfig`.
    pub fn new(
        base_url: &Url,
        session: SessionStore,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(
            http,
            base_url,
            session,
            transport.auth_header.clone(),
        ))
    }

    /// Create an executor around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &Url,
        session: SessionStore,
        auth_header: AuthHeader,
    ) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            auth_header,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Full URL for a backend path.
    ///
    /// The path must already be percent-encoded. Dot segments, a query or a
    /// fragment would let the parser route the request somewhere other than
    /// the path names, so they are rejected with [`Error::InvalidPath`].
    pub fn url_for(&self, path: &str) -> Result<Url, Error> {
        let path = path.trim_start_matches('/');
        if path.split('/').any(is_dot_segment) {
            return Err(Error::InvalidPath { path: path.into() });
        }
        let url = Url::parse(&format!("{}/{path}", self.base_url))?;
        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::InvalidPath { path: path.into() });
        }
        Ok(url)
    }

    /// Execute a request described by an [`ApiRequest`].
    pub async fn send(&self, request: &ApiRequest) -> Result<serde_json::Value, Error> {
        self.execute(request.method.clone(), &request.path, request.body.as_ref())
            .await
    }

    /// Execute a request and decode the JSON response into `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, Error> {
        let value = self.send(request).await?;
        decode_value(value)
    }

    /// Issue `method` against `base_url + path`, with an optional JSON body.
    ///
    /// Non-2xx responses become [`Error::Http`] with the raw body text;
    /// a 2xx body that is not JSON becomes [`Error::Decode`]. An empty 2xx
    /// body decodes as `null`.
    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<serde_json::Value, Error> {
        let url = self.url_for(path)?;
        debug!(%method, %url, "sending request");

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let session = self.session.get_session();
        if let Some(token) = session.auth_token.as_ref() {
            builder = builder.header(
                self.auth_header.name.as_str(),
                self.auth_header.value_for(token.expose_secret()),
            );
        }

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(Error::Serialization)?;
            builder = builder.body(bytes);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "request failed");
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        trace!(len = text.len(), "response body received");
        parse_body(&text)
    }
}

fn parse_body(text: &str) -> Result<serde_json::Value, Error> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        let preview = preview(text);
        Error::Decode {
            message: format!("{e} (body preview: {preview:?})"),
            body: text.to_owned(),
        }
    })
}

/// Decode an already-parsed JSON value into a typed payload.
pub fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, Error> {
    let body = value.to_string();
    serde_json::from_value(value).map_err(|e| Error::Decode {
        message: e.to_string(),
        body,
    })
}

// URL parsers fold these (including the percent-encoded spellings) into the
// parent directory.
fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

fn preview(text: &str) -> &str {
    let mut end = text.len().min(200);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn executor(base: &str) -> HttpExecutor {
        HttpExecutor::with_client(
            reqwest::Client::new(),
            &Url::parse(base).unwrap(),
            SessionStore::default(),
            AuthHeader::default(),
        )
    }

    #[test]
    fn url_for_joins_without_double_slash() {
        let exec = executor("http://localhost:8000/api/");
        assert_eq!(
            exec.url_for("/notifications").unwrap().as_str(),
            "http://localhost:8000/api/notifications"
        );
    }

    #[test]
    fn url_for_rejects_dot_segments() {
        let exec = executor("http://localhost:8000");
        for path in [
            "/wishlists/remove-item/u1/..",
            "/wishlists/remove-item/u1/.",
            "/wishlists/remove-item/%2E%2e",
            "/wishlists/./get-wishlist/u1",
        ] {
            assert!(
                matches!(exec.url_for(path), Err(Error::InvalidPath { .. })),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn url_for_rejects_query_and_fragment() {
        let exec = executor("http://localhost:8000");
        assert!(matches!(
            exec.url_for("/wishlists/remove-item/u1/p1?x=1"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            exec.url_for("/notifications/delete/n1#frag"),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn url_for_keeps_encoded_separators() {
        let exec = executor("http://localhost:8000");
        assert_eq!(
            exec.url_for("/wishlists/remove-item/u1/..%2Fclear-wishlist%2Fu1")
                .unwrap()
                .path(),
            "/wishlists/remove-item/u1/..%2Fclear-wishlist%2Fu1"
        );
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(parse_body("  ").unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = parse_body("<html>oops</html>").unwrap_err();
        match err {
            Error::Decode { body, .. } => assert_eq!(body, "<html>oops</html>"),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let text = "é".repeat(150);
        assert!(preview(&text).len() <= 200);
    }

    #[test]
    fn request_builders_set_method_and_body() {
        let req = ApiRequest::post("/wishlists/add-item", serde_json::json!({"a": 1}));
        assert_eq!(req.method, Method::POST);
        assert!(req.body.is_some());
        assert_eq!(ApiRequest::delete("/x").method, Method::DELETE);
        assert!(ApiRequest::put("/x").body.is_none());
    }
}
