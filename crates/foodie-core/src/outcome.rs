// ── Uniform result shape for UI layers ──
//
// Every operation's `Result` can be flattened into
// `{ "success": bool, "data"?: T, "error"?: { kind, message, status? } }`.

use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&CoreError> for ErrorInfo {
    fn from(err: &CoreError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            status: err.status(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl<T> Outcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(err: &CoreError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorInfo::from(err)),
        }
    }
}

impl<T> From<Result<T, CoreError>> for Outcome<T> {
    fn from(result: Result<T, CoreError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::failed(&err),
        }
    }
}
