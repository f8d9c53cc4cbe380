//! Config subcommand handlers.

use std::io::{self, IsTerminal};

use foodie_core::Session;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile, TokenStorage};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

fn redact(cfg: &mut Config) {
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(REDACTED.into());
        }
    }
}

/// Read the token from the terminal without echo.
fn prompt_token() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "pass --token when not running interactively".into(),
        });
    }
    let token = rpassword::prompt_password("Session token: ")?;
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(token)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = config::load_config()?;
            redact(&mut cfg);
            let out = match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&cfg)?,
                OutputFormat::JsonCompact => serde_json::to_string(&cfg)?,
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Login {
            user_name,
            plaintext,
        } => {
            let user_id = global.user_id.clone().ok_or_else(|| CliError::Validation {
                field: "user-id".into(),
                reason: "login needs --user-id".into(),
            })?;
            let token = match &global.token {
                Some(token) => token.clone(),
                None => prompt_token()?,
            };

            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            if let Some(url) = &global.base_url {
                url::Url::parse(url).map_err(|_| CliError::Validation {
                    field: "base-url".into(),
                    reason: format!("invalid URL: {url}"),
                })?;
                cfg.profiles
                    .entry(profile_name.clone())
                    .or_insert_with(|| Profile::new(url.clone()))
                    .base_url
                    .clone_from(url);
            } else if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::NoConfig {
                    path: config::config_path().display().to_string(),
                });
            }

            let mut session = Session::new(user_id.clone(), token);
            session.user_name = user_name;
            let storage = if plaintext {
                TokenStorage::Plaintext
            } else {
                TokenStorage::Keyring
            };
            config::save_session(&mut cfg, &profile_name, &session, storage)?;
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }
            config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Signed in as {user_id} on profile '{profile_name}'");
            }
            Ok(())
        }

        ConfigCommand::Logout => {
            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            config::clear_session(&mut cfg, &profile_name)?;
            config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Signed out of profile '{profile_name}'");
            }
            Ok(())
        }
    }
}
