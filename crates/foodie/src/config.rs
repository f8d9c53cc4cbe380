//! CLI configuration: thin wrapper around `foodie_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --token, --user-id, ...).

use std::time::Duration;

use secrecy::SecretString;

use foodie_api::TlsMode;
use foodie_config::{profile_to_client_config, session_from_profile};
use foodie_core::{ClientConfig, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use foodie_config::{
    Config, Profile, TokenStorage, clear_session, config_path, load_config, save_config,
    save_session,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

fn parse_base_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "base-url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build the client config and session for this invocation.
///
/// The profile (if any) supplies defaults; flags override each field.
/// Without a profile, `--base-url` is required.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<(ClientConfig, Session), CliError> {
    let profile_name = active_profile_name(global, cfg);

    let (mut client_config, mut session) = match cfg.profiles.get(&profile_name) {
        Some(profile) => (
            profile_to_client_config(profile, &cfg.defaults)?,
            session_from_profile(profile, &profile_name),
        ),
        None => {
            let Some(url) = global.base_url.as_deref() else {
                if global.profile.is_some() {
                    let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
                    available.sort_unstable();
                    return Err(CliError::ProfileNotFound {
                        name: profile_name,
                        available: if available.is_empty() {
                            "(none)".into()
                        } else {
                            available.join(", ")
                        },
                    });
                }
                return Err(CliError::NoConfig {
                    path: config_path().display().to_string(),
                });
            };
            let mut client_config = ClientConfig::new(parse_base_url(url)?);
            client_config.timeout = Duration::from_secs(cfg.defaults.timeout);
            (client_config, Session::default())
        }
    };

    if let Some(ref url) = global.base_url {
        client_config.base_url = parse_base_url(url)?;
    }
    if global.insecure {
        client_config.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client_config.timeout = Duration::from_secs(secs);
    }
    if let Some(ref token) = global.token {
        session.auth_token = Some(SecretString::from(token.clone()));
    }
    if let Some(ref user_id) = global.user_id {
        session.user_id = Some(user_id.clone());
    }

    tracing::debug!(
        profile = %profile_name,
        base_url = %client_config.base_url,
        signed_in = session.is_authenticated(),
        "resolved client configuration"
    );
    Ok((client_config, session))
}
