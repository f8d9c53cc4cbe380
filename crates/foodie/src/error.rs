//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use foodie_config::ConfigError;
use foodie_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend: {reason}")]
    #[diagnostic(
        code(foodie::connection_failed),
        help(
            "Check that the API is running and the base URL is right.\n\
             Try: foodie config show"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(foodie::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Not signed in")]
    #[diagnostic(
        code(foodie::not_signed_in),
        help(
            "This command acts on behalf of a user.\n\
             Run: foodie config login --user-id <ID> --token <TOKEN>\n\
             Or pass --user-id and --token directly."
        )
    )]
    NotSignedIn,

    #[error("The backend refused the session (HTTP {status})")]
    #[diagnostic(
        code(foodie::auth_failed),
        help(
            "The token may have expired.\n\
             Run: foodie config login --user-id <ID> --token <TOKEN>"
        )
    )]
    AuthFailed { status: u16 },

    #[error("Keyring unavailable: {reason}")]
    #[diagnostic(
        code(foodie::keyring),
        help("Store the token in the config file instead with --plaintext.")
    )]
    Keyring { reason: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(foodie::not_found),
        help("Run: foodie {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(foodie::api_error))]
    ApiError { status: Option<u16>, message: String },

    #[error("Rejected by the backend: {message}")]
    #[diagnostic(code(foodie::rejected))]
    Rejected { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(foodie::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(foodie::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Pass --base-url to work without a profile."
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(foodie::no_config),
        help(
            "Pass --base-url (or set FOODIE_BASE_URL), or add a profile to\n\
             {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(foodie::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(foodie::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(foodie::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render TOML: {0}")]
    #[diagnostic(code(foodie::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotSignedIn | Self::AuthFailed { .. } | Self::Keyring { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotAuthenticated => CliError::NotSignedIn,

            CoreError::Network {
                timed_out: true, ..
            } => CliError::Timeout,

            CoreError::Network { reason, .. } => CliError::ConnectionFailed { reason },

            CoreError::Http {
                status: status @ (401 | 403),
                ..
            } => CliError::AuthFailed { status },

            CoreError::Http { status, body } => CliError::ApiError {
                status: Some(status),
                message: if body.is_empty() {
                    "(empty response)".into()
                } else {
                    body
                },
            },

            CoreError::NotFound { resource, id } => CliError::NotFound {
                list_command: format!("{resource}s list"),
                resource_type: resource.into(),
                identifier: id,
            },

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Config { message },

            err @ (CoreError::Decode { .. } | CoreError::Superseded { .. }) => {
                CliError::ApiError {
                    status: None,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile(name) => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Keyring(e) => CliError::Keyring {
                reason: e.to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
