//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use hue_config::ConfigError;
use hue_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to bridge at {url}")]
    #[diagnostic(
        code(hue::connection_failed),
        help(
            "Check that the bridge is powered and reachable: {reason}\n\
             Bridges use a self-signed certificate; try --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(hue::timeout),
        help("Increase timeout with --timeout or check bridge responsiveness.")
    )]
    Timeout,

    #[error("Interrupted")]
    #[diagnostic(code(hue::cancelled))]
    Cancelled,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hue::auth_failed),
        help(
            "The bridge rejected the application key.\n\
             Press the link button and create a new key, then update profile '{profile}'."
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No application key configured for profile '{profile}'")]
    #[diagnostic(
        code(hue::no_credentials),
        help(
            "Pass --application-key, set HUE_APPLICATION_KEY, or add\n\
             application_key / application_key_env to the profile."
        )
    )]
    NoCredentials { profile: String },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(hue::not_found), help("{hint}"))]
    NotFound {
        resource_type: String,
        identifier: String,
        hint: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Bridge error ({status}): {message}")]
    #[diagnostic(code(hue::api_error))]
    ApiError { status: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hue::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hue::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No bridge configured")]
    #[diagnostic(
        code(hue::no_config),
        help(
            "Pass --bridge and --application-key, or create a profile in\n\
             {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(hue::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    #[diagnostic(code(hue::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Cancelled => exit_code::CANCELLED,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            Self::ApiError { .. } | Self::Config(_) | Self::Io(_) | Self::Json(_) => {
                exit_code::GENERAL
            }
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                profile: "current".into(),
                message,
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Cancelled => CliError::Cancelled,

            CoreError::DeviceNotFound { identifier } => CliError::NotFound {
                resource_type: "device".into(),
                identifier,
                hint: "Run: hue-import devices to see known MAC addresses".into(),
            },

            CoreError::MissingService {
                mac,
                device_id,
                service,
            } => CliError::NotFound {
                resource_type: format!("{service} service"),
                identifier: mac,
                hint: format!("Device {device_id} has that MAC address but no {service} service"),
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                hint: format!("Check the {entity_type} name in the Hue app; names are case-sensitive"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Api { message, status } => CliError::ApiError {
                status: status.map_or_else(|| "-".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "bridge".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                status: "internal".into(),
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: String::new(),
            },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}
