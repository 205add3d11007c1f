//! Device identity correlation between `hue-api` and bridge tooling.
//!
//! The Hue bridge keeps device metadata and radio hardware addresses in two
//! separate registries. This crate joins them and serves the result:
//!
//! - **[`CachedClient`]**: facade over any [`hue_api::HueServiceClient`].
//!   Answers MAC address -> light / motion sensor and behavior-script
//!   name -> id lookups from a device mapping built lazily, once, under a
//!   mutex. All service accessors pass straight through.
//!
//! - **[`DeviceMapping`]**: the correlated snapshot: one [`DeviceEntry`] per
//!   device id plus the connectivity records whose owner is unknown.
//!
//! - **[`ResultCache`]**: name-keyed memo table refreshed wholesale on miss.
//!
//! - **[`report`]**: renders the mapping as Terraform `import` blocks.
//!
//! - **[`BridgeConfig`]**: runtime connection settings, built by
//!   `hue-config` or by hand.

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod report;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CachedClient, DeviceMapping, ResultCache};
pub use config::{BridgeConfig, TlsVerification};
pub use error::CoreError;
pub use model::{DeviceEntry, MacAddress};
pub use report::generate_import_output;
