//! Profile + flag resolution into a `BridgeConfig`.
//!
//! Precedence for every setting: CLI flag (or its `HUE_*` env var), then
//! the selected profile, then `[defaults]`.

use std::time::Duration;

use secrecy::SecretString;

use hue_config::{Config, OutputTarget, Profile};
use hue_core::{BridgeConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything a bridge-bound command needs.
#[derive(Debug)]
pub struct Resolved {
    pub bridge: BridgeConfig,
    /// Import report destination from profile / defaults.
    pub output: OutputTarget,
}

pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = hue_config::load_config()?;
    resolve_with(global, &cfg)
}

pub fn resolve_with(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let profile_name = cfg.profile_name(global.profile.as_deref());

    match cfg.profiles.get(profile_name) {
        Some(profile) => from_profile(global, cfg, profile, profile_name),
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            name: profile_name.to_owned(),
            available: available_profiles(cfg),
        }),
        None => from_flags(global, cfg, profile_name),
    }
}

fn from_profile(
    global: &GlobalOpts,
    cfg: &Config,
    profile: &Profile,
    profile_name: &str,
) -> Result<Resolved, CliError> {
    // Flags win over the profile's own values.
    let mut effective = profile.clone();
    if let Some(ref bridge) = global.bridge {
        effective.bridge.clone_from(bridge);
    }
    if global.insecure {
        effective.insecure = Some(true);
    }
    if global.timeout.is_some() {
        effective.timeout = global.timeout;
    }
    let key = global.application_key.clone().map(SecretString::from);

    Ok(Resolved {
        bridge: hue_config::profile_to_bridge_config(&effective, profile_name, &cfg.defaults, key)?,
        output: hue_config::resolve_output(profile, &cfg.defaults)?,
    })
}

fn from_flags(global: &GlobalOpts, cfg: &Config, profile_name: &str) -> Result<Resolved, CliError> {
    let bridge = global.bridge.as_deref().ok_or_else(|| CliError::NoConfig {
        path: hue_config::config_path().display().to_string(),
    })?;
    let key = global
        .application_key
        .as_ref()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.to_owned(),
        })?;

    let mut config = BridgeConfig::new(bridge.trim(), SecretString::from(key.clone()));
    // Bridges only ship self-signed certificates.
    config.tls = TlsVerification::DangerAcceptInvalid;
    config.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));

    Ok(Resolved {
        bridge: config,
        output: cfg.defaults.output.parse()?,
    })
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::OutputFormat;

    fn global() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            bridge: None,
            application_key: None,
            format: OutputFormat::Table,
            verbose: 0,
            insecure: false,
            timeout: None,
        }
    }

    fn config_with_home() -> Config {
        let mut cfg = Config {
            default_profile: Some("home".into()),
            ..Config::default()
        };
        cfg.profiles.insert(
            "home".into(),
            Profile {
                bridge: "192.168.1.20".into(),
                application_key: Some("profile-key".into()),
                insecure: Some(false),
                timeout: Some(5),
                output: Some("imports.tf".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_home();
        let mut opts = global();
        opts.bridge = Some("10.0.0.2".into());
        opts.application_key = Some("flag-key".into());
        opts.insecure = true;
        opts.timeout = Some(60);

        let resolved = resolve_with(&opts, &cfg).unwrap();
        assert_eq!(resolved.bridge.bridge, "10.0.0.2");
        assert_eq!(resolved.bridge.application_key.expose_secret(), "flag-key");
        assert_eq!(resolved.bridge.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(resolved.bridge.timeout, Duration::from_secs(60));
        assert_eq!(
            resolved.output,
            OutputTarget::File(std::path::PathBuf::from("imports.tf"))
        );
    }

    #[test]
    fn no_profile_requires_bridge_flag() {
        let err = resolve_with(&global(), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }), "got: {err:?}");

        let mut opts = global();
        opts.bridge = Some("192.168.1.20".into());
        let err = resolve_with(&opts, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoCredentials { .. }), "got: {err:?}");

        opts.application_key = Some("k".into());
        let resolved = resolve_with(&opts, &Config::default()).unwrap();
        assert_eq!(resolved.output, OutputTarget::Stdout);
        assert_eq!(resolved.bridge.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unknown_explicit_profile_lists_available() {
        let cfg = config_with_home();
        let mut opts = global();
        opts.profile = Some("office".into());
        let err = resolve_with(&opts, &cfg).unwrap_err();
        assert!(
            matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "home"),
            "got: {err:?}"
        );
    }

    #[test]
    fn bridge_flag_fills_empty_profile_bridge() {
        let mut cfg = config_with_home();
        cfg.profiles.get_mut("home").unwrap().bridge = String::new();

        let err = resolve_with(&global(), &cfg).unwrap_err();
        assert!(
            matches!(err, CliError::Validation { ref field, .. } if field == "bridge"),
            "got: {err:?}"
        );

        let mut opts = global();
        opts.bridge = Some("10.0.0.9".into());
        opts.application_key = Some("flag-key".into());
        let resolved = resolve_with(&opts, &cfg).unwrap();
        assert_eq!(resolved.bridge.bridge, "10.0.0.9");
        assert_eq!(resolved.bridge.tls, TlsVerification::SystemDefaults);
        assert_eq!(resolved.bridge.timeout, Duration::from_secs(5));
    }
}
