use serde::{Deserialize, Serialize};

use super::{Resource, ResourceRef, ResourceType};

/// Zigbee radio record. `owner` points at the device the radio belongs to;
/// `mac_address` is the hardware address users know the device by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZigbeeConnectivity {
    pub id: String,
    pub owner: ResourceRef,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl Resource for ZigbeeConnectivity {
    const RESOURCE_TYPE: ResourceType = ResourceType::ZigbeeConnectivity;
}
