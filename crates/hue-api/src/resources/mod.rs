// ── CLIP v2 resource types ──
//
// Every bridge resource is addressed as `/clip/v2/resource/{rtype}[/{id}]`
// and cross-referenced through `{rid, rtype}` pairs. The generic
// `ResourceService<T>` serves any type implementing `Resource`.

mod behavior;
mod device;
mod group;
mod light;
mod motion;
mod scene;
mod zigbee_connectivity;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::BridgeHttp;
use crate::error::Error;

pub use behavior::{BehaviorInstance, BehaviorScript, ScriptMetadata};
pub use device::{Device, ProductData};
pub use group::{Room, Zone};
pub use light::{Color, ColorTemperature, Dimming, Light, OnState, Xy};
pub use motion::{Motion, MotionReport};
pub use scene::{Scene, SceneAction};
pub use zigbee_connectivity::ZigbeeConnectivity;

// ── Identity types ──────────────────────────────────────────────────

/// Resource kinds the bridge reports in `rtype` fields.
///
/// Kinds this crate does not model deserialize as [`Unknown`](Self::Unknown)
/// so newer firmware never breaks inventory parsing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum ResourceType {
    Device,
    Light,
    Motion,
    ZigbeeConnectivity,
    Room,
    Zone,
    Scene,
    BehaviorScript,
    BehaviorInstance,
    GroupedLight,
    DevicePower,
    Temperature,
    LightLevel,
    Button,
    Bridge,
    #[serde(other)]
    Unknown,
}

/// Cross-reference to another resource: `{ "rid": "...", "rtype": "light" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub rid: String,
    pub rtype: ResourceType,
}

impl ResourceRef {
    pub fn new(rid: impl Into<String>, rtype: ResourceType) -> Self {
        Self {
            rid: rid.into(),
            rtype,
        }
    }
}

/// Human-facing metadata shared by devices, lights, rooms, zones and scenes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub archetype: Option<String>,
}

// ── Generic service ─────────────────────────────────────────────────

/// A resource type served under `/clip/v2/resource/{RESOURCE_TYPE}`.
pub trait Resource: DeserializeOwned + Send + 'static {
    const RESOURCE_TYPE: ResourceType;
}

/// Read-only access to one resource family.
pub struct ResourceService<T> {
    http: Arc<BridgeHttp>,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceService<T> {
    pub(crate) fn new(http: Arc<BridgeHttp>) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    /// Fetch the full inventory of this resource type.
    pub async fn list(&self) -> Result<Vec<T>, Error> {
        let url = self.http.resource_url(T::RESOURCE_TYPE.as_ref())?;
        let items: Vec<T> = self.http.get(url).await?;
        debug!(rtype = %T::RESOURCE_TYPE, count = items.len(), "fetched inventory");
        Ok(items)
    }

    /// Fetch a single resource by id.
    pub async fn get(&self, id: &str) -> Result<T, Error> {
        let url = self
            .http
            .resource_url(&format!("{}/{id}", T::RESOURCE_TYPE))?;
        let not_found = || Error::NotFound {
            resource_type: T::RESOURCE_TYPE.to_string(),
            id: id.to_owned(),
        };

        match self.http.get::<T>(url).await {
            Ok(items) => items.into_iter().next().ok_or_else(not_found),
            Err(Error::Bridge { status: 404, .. }) => Err(not_found()),
            Err(e) => Err(e),
        }
    }
}

// ── Service aliases ─────────────────────────────────────────────────

pub type LightService = ResourceService<Light>;
pub type RoomService = ResourceService<Room>;
pub type ZoneService = ResourceService<Zone>;
pub type SceneService = ResourceService<Scene>;
pub type DeviceService = ResourceService<Device>;
pub type ZigbeeConnectivityService = ResourceService<ZigbeeConnectivity>;
pub type BehaviorInstanceService = ResourceService<BehaviorInstance>;
pub type BehaviorScriptService = ResourceService<BehaviorScript>;
pub type MotionService = ResourceService<Motion>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_round_trips_snake_case() {
        let rtype: ResourceType = serde_json::from_str("\"zigbee_connectivity\"").unwrap();
        assert_eq!(rtype, ResourceType::ZigbeeConnectivity);
        assert_eq!(rtype.to_string(), "zigbee_connectivity");
        assert_eq!(ResourceType::BehaviorScript.as_ref(), "behavior_script");
    }

    #[test]
    fn unmodelled_resource_type_is_unknown() {
        let r: ResourceRef =
            serde_json::from_str(r#"{"rid":"x","rtype":"entertainment_configuration"}"#).unwrap();
        assert_eq!(r.rtype, ResourceType::Unknown);
    }

    #[test]
    fn metadata_name_defaults_to_empty() {
        let m: Metadata = serde_json::from_str(r#"{"archetype":"sultan_bulb"}"#).unwrap();
        assert_eq!(m.name, "");
        assert_eq!(m.archetype.as_deref(), Some("sultan_bulb"));
    }
}
