// ── Runtime bridge configuration ──
//
// These types describe *how* to reach a Hue bridge. They carry the
// application key and connection tuning, but never touch disk.
// The CLI (via hue-config) constructs a `BridgeConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use hue_api::{HueClient, TlsMode, TransportConfig};
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;

use crate::cache::CachedClient;
use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file (e.g. the Signify bridge root CA).
    CustomCa(PathBuf),
    /// Skip verification. Default, since bridges are addressed by IP.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for talking to a single bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Bridge host, IP, or base URL (e.g. `192.168.1.20`).
    pub bridge: String,
    /// Application key issued by the bridge's link-button pairing flow.
    pub application_key: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl BridgeConfig {
    pub fn new(bridge: impl Into<String>, application_key: SecretString) -> Self {
        Self {
            bridge: bridge.into(),
            application_key,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Transport settings for the underlying HTTP client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }

    /// Build the raw bridge client. No request is sent.
    pub fn build_client(&self) -> Result<HueClient, CoreError> {
        Ok(HueClient::from_application_key(
            &self.bridge,
            &self.application_key,
            &self.transport(),
        )?)
    }

    /// Build a caching client whose inventory fetches stop when `cancel`
    /// (or any of its ancestors) is cancelled.
    pub fn build_cached_client(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CachedClient<HueClient>, CoreError> {
        Ok(CachedClient::with_cancellation(self.build_client()?, cancel))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_bridge_certificates() {
        let config = BridgeConfig::new("192.168.1.20", SecretString::from("key".to_owned()));
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(matches!(config.transport().tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn builds_client_for_bare_host() {
        let config = BridgeConfig::new("192.168.1.20", SecretString::from("key".to_owned()));
        let client = config.build_client().unwrap();
        assert_eq!(client.base_url().as_str(), "https://192.168.1.20/");
    }

    #[test]
    fn invalid_bridge_address_is_config_error() {
        let config = BridgeConfig::new("http://[::1", SecretString::from("key".to_owned()));
        let err = config.build_client().unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }), "got: {err:?}");
    }
}
