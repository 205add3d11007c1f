//! Shared configuration for Hue bridge tooling.
//!
//! TOML profiles, application key resolution (env + keyring + plaintext),
//! and translation to `hue_core::BridgeConfig`. The `hue-import` binary
//! layers its command-line overrides on top.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use hue_core::{BridgeConfig, TlsVerification};

const KEYRING_SERVICE: &str = "hue-import";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("no application key configured for profile '{profile}'")]
    NoCredentials { profile: String },

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
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named bridge profiles.
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
    /// Name of the profile to use: `requested`, else `default_profile`,
    /// else `"default"`.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Import report destination: `STDOUT` or a file path.
    #[serde(default = "default_output")]
    pub output: String,

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
    "STDOUT".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named bridge profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Bridge host, IP, or base URL (e.g., "192.168.1.20").
    pub bridge: String,

    /// Application key (plaintext; prefer keyring or env var).
    pub application_key: Option<String>,

    /// Environment variable name containing the application key.
    pub application_key_env: Option<String>,

    /// Path to the bridge CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,

    /// Override import report destination.
    pub output: Option<String>,
}

// ── Output destination ──────────────────────────────────────────────

/// Where the import report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl FromStr for OutputTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::Validation {
                field: "output".into(),
                reason: "must be STDOUT or a file path".into(),
            });
        }
        if s.eq_ignore_ascii_case("stdout") || s == "-" {
            Ok(Self::Stdout)
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("STDOUT"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Report destination for `profile`, falling back to the global default.
pub fn resolve_output(profile: &Profile, defaults: &Defaults) -> Result<OutputTarget, ConfigError> {
    profile
        .output
        .as_deref()
        .unwrap_or(&defaults.output)
        .parse()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "hue-import", "hue-import").map_or_else(
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
    p.push("hue-import");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` (which need not exist), then `HUE_` env vars.
///
/// Nested keys use a double underscore: `HUE_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HUE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/application-key")
}

/// Resolve the application key: profile's env var, then the system
/// keyring, then plaintext in the config.
pub fn resolve_application_key(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_application_key_with(
        profile,
        profile_name,
        |name| std::env::var(name).ok(),
        |user| {
            keyring::Entry::new(KEYRING_SERVICE, user)
                .and_then(|entry| entry.get_password())
                .ok()
        },
    )
}

fn resolve_application_key_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's application_key_env → env var lookup
    if let Some(val) = profile.application_key_env.as_deref().and_then(&env) {
        return Ok(SecretString::from(val));
    }

    // 2. System keyring
    if let Some(secret) = keyring(&keyring_user(profile_name)) {
        return Ok(SecretString::from(secret));
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.application_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// TLS mode for a profile. An explicit `insecure = false` opts into the
/// system trust store; with nothing set the bridge's self-signed
/// certificate is accepted.
pub fn resolve_tls(profile: &Profile) -> TlsVerification {
    match (profile.insecure, &profile.ca_cert) {
        (_, Some(ca_path)) if profile.insecure != Some(true) => {
            TlsVerification::CustomCa(ca_path.clone())
        }
        (Some(false), None) => TlsVerification::SystemDefaults,
        _ => TlsVerification::DangerAcceptInvalid,
    }
}

/// Build a `BridgeConfig` from a profile.
///
/// An `application_key` supplied by the caller (e.g. a command-line flag)
/// skips the env/keyring/plaintext lookup entirely.
pub fn profile_to_bridge_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    application_key: Option<SecretString>,
) -> Result<BridgeConfig, ConfigError> {
    if profile.bridge.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "bridge".into(),
            reason: format!("profile '{profile_name}' has no bridge address"),
        });
    }

    let application_key = match application_key {
        Some(key) => key,
        None => resolve_application_key(profile, profile_name)?,
    };

    let mut config = BridgeConfig::new(profile.bridge.trim(), application_key);
    config.tls = resolve_tls(profile);
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    Ok(config)
}
