//! Shared configuration for foodie tools.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), session
//! persistence, and translation to `foodie_core::ClientConfig`. The CLI
//! layers its global flags on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use foodie_api::{AuthHeader, Session, TlsMode};
use foodie_core::{ClientConfig, ResponseOrdering};

/// Keyring service name; entries are keyed `<profile>/token`.
const KEYRING_SERVICE: &str = "foodie";

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "FOODIE_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{0}' not found in config")]
    UnknownProfile(String),

    #[error("keyring unavailable: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the explicit one, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.into()))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile plus the session persisted for it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://api.organicfoodie.in/api").
    pub base_url: String,

    /// Header carrying the token. Defaults to `authorization`.
    pub auth_header: Option<String>,

    /// Scheme prefixed to the token. Defaults to `Bearer`; empty sends the
    /// bare token.
    pub auth_scheme: Option<String>,

    pub user_id: Option<String>,
    pub user_name: Option<String>,

    /// Session token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub insecure: bool,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// `last-issued-wins` (default) or `last-resolved-wins`.
    pub ordering: Option<String>,
}

impl Profile {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$FOODIE_CONFIG`, else the platform
/// config directory.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("in", "organicfoodie", "foodie").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("foodie");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then the TOML file at `path` (if any), then `FOODIE_*`
/// variables with `__` separating nested keys.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FOODIE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Session persistence ─────────────────────────────────────────────

/// Where `save_session` puts the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStorage {
    #[default]
    Keyring,
    /// In the config file itself.
    Plaintext,
}

/// Secure token storage, keyed by profile name.
trait TokenVault {
    fn get(&self, profile_name: &str) -> Result<String, keyring::Error>;
    fn set(&self, profile_name: &str, token: &str) -> Result<(), keyring::Error>;
    fn delete(&self, profile_name: &str) -> Result<(), keyring::Error>;
}

/// The platform keyring, service `foodie`, entry `<profile>/token`.
struct SystemKeyring;

impl SystemKeyring {
    fn entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
    }
}

impl TokenVault for SystemKeyring {
    fn get(&self, profile_name: &str) -> Result<String, keyring::Error> {
        Self::entry(profile_name)?.get_password()
    }

    fn set(&self, profile_name: &str, token: &str) -> Result<(), keyring::Error> {
        Self::entry(profile_name)?.set_password(token)
    }

    fn delete(&self, profile_name: &str) -> Result<(), keyring::Error> {
        Self::entry(profile_name)?.delete_credential()
    }
}

/// Drop any vaulted token for the profile. An absent entry is fine; other
/// failures are logged.
fn forget_token(vault: &impl TokenVault, profile_name: &str) {
    match vault.delete(profile_name) {
        Ok(()) | Err(keyring::Error::NoEntry) => {}
        Err(err) => warn!(profile = profile_name, error = %err, "could not clear keyring token"),
    }
}

/// Resolve the session token from the credential chain. `None` means the
/// session is anonymous, which is not an error.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    resolve_token_in(&SystemKeyring, profile, profile_name)
}

fn resolve_token_in(
    vault: &impl TokenVault,
    profile: &Profile,
    profile_name: &str,
) -> Option<SecretString> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(secret) = vault.get(profile_name) {
        return Some(SecretString::from(secret));
    }

    // 3. Plaintext in config
    profile.token.clone().map(SecretString::from)
}

/// Session persisted for a profile.
pub fn session_from_profile(profile: &Profile, profile_name: &str) -> Session {
    Session {
        user_id: profile.user_id.clone(),
        auth_token: resolve_token(profile, profile_name),
        user_name: profile.user_name.clone(),
    }
}

/// Record `session` on the named profile. The token goes to the keyring or,
/// with [`TokenStorage::Plaintext`], into the profile; a token left in the
/// other store is removed so it cannot shadow the new one. The caller writes
/// the config back with [`save_config`].
pub fn save_session(
    cfg: &mut Config,
    profile_name: &str,
    session: &Session,
    storage: TokenStorage,
) -> Result<(), ConfigError> {
    save_session_in(&SystemKeyring, cfg, profile_name, session, storage)
}

fn save_session_in(
    vault: &impl TokenVault,
    cfg: &mut Config,
    profile_name: &str,
    session: &Session,
    storage: TokenStorage,
) -> Result<(), ConfigError> {
    let profile = cfg
        .profiles
        .get_mut(profile_name)
        .ok_or_else(|| ConfigError::UnknownProfile(profile_name.into()))?;

    profile.user_id.clone_from(&session.user_id);
    profile.user_name.clone_from(&session.user_name);

    match (&session.auth_token, storage) {
        (Some(token), TokenStorage::Keyring) => {
            vault.set(profile_name, token.expose_secret())?;
            profile.token = None;
        }
        (Some(token), TokenStorage::Plaintext) => {
            forget_token(vault, profile_name);
            profile.token = Some(token.expose_secret().to_owned());
        }
        (None, _) => {
            forget_token(vault, profile_name);
            profile.token = None;
        }
    }

    debug!(profile = profile_name, ?storage, "session saved");
    Ok(())
}

/// Remove user id, user name and token from the named profile and the
/// keyring. A missing keyring is logged, not fatal.
pub fn clear_session(cfg: &mut Config, profile_name: &str) -> Result<(), ConfigError> {
    clear_session_in(&SystemKeyring, cfg, profile_name)
}

fn clear_session_in(
    vault: &impl TokenVault,
    cfg: &mut Config,
    profile_name: &str,
) -> Result<(), ConfigError> {
    let profile = cfg
        .profiles
        .get_mut(profile_name)
        .ok_or_else(|| ConfigError::UnknownProfile(profile_name.into()))?;

    profile.user_id = None;
    profile.user_name = None;
    profile.token = None;

    forget_token(vault, profile_name);
    Ok(())
}

// ── Client config ───────────────────────────────────────────────────

pub fn parse_ordering(value: &str) -> Result<ResponseOrdering, ConfigError> {
    match value {
        "last-issued-wins" => Ok(ResponseOrdering::LastIssuedWins),
        "last-resolved-wins" => Ok(ResponseOrdering::LastResolvedWins),
        other => Err(ConfigError::Validation {
            field: "ordering".into(),
            reason: format!("expected 'last-issued-wins' or 'last-resolved-wins', got '{other}'"),
        }),
    }
}

/// Build a `ClientConfig` from a profile, no CLI flag overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let base_url: url::Url = profile
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", profile.base_url),
        })?;

    let mut config = ClientConfig::new(base_url);

    config.tls = if profile.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    let mut auth_header = AuthHeader::default();
    if let Some(ref name) = profile.auth_header {
        auth_header.name.clone_from(name);
    }
    if let Some(ref scheme) = profile.auth_scheme {
        auth_header.scheme.clone_from(scheme);
    }
    config.auth_header = auth_header;

    if let Some(ref ordering) = profile.ordering {
        config.ordering = parse_ordering(ordering)?;
    }

    Ok(config)
}
