use thiserror::Error;

/// Top-level error type for the `hue-api` crate.
///
/// Covers every failure mode of the CLIP v2 surface: authentication,
/// transport, bridge-reported errors, and response decoding.
/// `hue-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The bridge rejected the application key (HTTP 401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Bridge ──────────────────────────────────────────────────────
    /// Errors reported in the `errors` array of the response envelope,
    /// or a non-success status without a usable body.
    #[error("Bridge error (HTTP {status}): {message}")]
    Bridge { status: u16, message: String },

    /// A get-by-id request named a resource the bridge does not know.
    #[error("{resource_type} '{id}' not found on bridge")]
    NotFound { resource_type: String, id: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the application key was rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Bridge { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Bridge { status: 404, .. } | Self::NotFound { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_server_errors_are_transient() {
        let err = Error::Bridge {
            status: 503,
            message: "bridge busy".into(),
        };
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_variants() {
        let err = Error::NotFound {
            resource_type: "light".into(),
            id: "abc".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "light 'abc' not found on bridge");

        let err = Error::Bridge {
            status: 404,
            message: "resource not available".into(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn authentication_is_not_transient() {
        let err = Error::Authentication {
            message: "unauthorized user".into(),
        };
        assert!(err.is_auth_failure());
        assert!(!err.is_transient());
    }
}
