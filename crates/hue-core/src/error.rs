// ── Core error types ──
//
// User-facing errors from hue-core. Consumers never see HTTP status codes
// or JSON parse failures directly; the `From<hue_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to bridge at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Bridge request timed out")]
    Timeout,

    #[error("Operation cancelled")]
    Cancelled,

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Device {device_id} with MAC address {mac} has no {service} service")]
    MissingService {
        mac: String,
        device_id: String,
        service: &'static str,
    },

    #[error("Entity not found: {entity_type} '{identifier}'")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for every "nothing matches that key" outcome.
    ///
    /// A device that exists but lacks the requested service counts as not
    /// found: callers must never receive an empty identifier as success.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotFound { .. } | Self::MissingService { .. } | Self::NotFound { .. }
        )
    }

    /// Returns `true` if the error came from talking to the bridge rather
    /// than from a lookup miss.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::AuthenticationFailed { .. }
                | Self::Timeout
                | Self::Cancelled
                | Self::Api { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hue_api::Error> for CoreError {
    fn from(err: hue_api::Error) -> Self {
        match err {
            hue_api::Error::Authentication { message } => CoreError::AuthenticationFailed { message },
            hue_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            hue_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid bridge URL: {e}"),
            },
            hue_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            hue_api::Error::Bridge { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            hue_api::Error::NotFound { resource_type, id } => CoreError::NotFound {
                entity_type: resource_type,
                identifier: id,
            },
            hue_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_service_is_a_not_found() {
        let err = CoreError::MissingService {
            mac: "aa:bb:cc:dd:ee:ff".into(),
            device_id: "dev-1".into(),
            service: "motion",
        };
        assert!(err.is_not_found());
        assert!(!err.is_upstream());
        assert_eq!(
            err.to_string(),
            "Device dev-1 with MAC address aa:bb:cc:dd:ee:ff has no motion service"
        );
    }

    #[test]
    fn bridge_errors_become_api_errors() {
        let err = CoreError::from(hue_api::Error::Bridge {
            status: 503,
            message: "busy".into(),
        });
        assert!(matches!(err, CoreError::Api { status: Some(503), .. }));
        assert!(err.is_upstream());
        assert!(!err.is_not_found());
    }

    #[test]
    fn api_not_found_keeps_identity() {
        let err = CoreError::from(hue_api::Error::NotFound {
            resource_type: "light".into(),
            id: "light-9".into(),
        });
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: light 'light-9'");
    }
}
