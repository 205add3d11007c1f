use serde::{Deserialize, Serialize};

use super::{Metadata, Resource, ResourceRef, ResourceType};

/// A physical unit managed by the bridge. Its logical capabilities
/// (light, motion, zigbee radio, ...) are listed in `services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub id_v1: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub product_data: Option<ProductData>,
    #[serde(default)]
    pub services: Vec<ResourceRef>,
}

impl Device {
    /// First service of the given type, if the device exposes one.
    pub fn service(&self, rtype: ResourceType) -> Option<&ResourceRef> {
        self.services.iter().find(|s| s.rtype == rtype)
    }
}

impl Resource for Device {
    const RESOURCE_TYPE: ResourceType = ResourceType::Device;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub software_version: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_bridge_device_payload() {
        let json = r#"{
            "id": "3ee8b1b2-8ad0-4b53-9a10-5b7e4f1c0a01",
            "id_v1": "/lights/4",
            "product_data": {
                "model_id": "LCA001",
                "manufacturer_name": "Signify Netherlands B.V.",
                "product_name": "Hue color lamp",
                "software_version": "1.104.2"
            },
            "metadata": { "name": "Desk lamp", "archetype": "sultan_bulb" },
            "services": [
                { "rid": "light-1", "rtype": "light" },
                { "rid": "zb-1", "rtype": "zigbee_connectivity" },
                { "rid": "ent-1", "rtype": "entertainment" }
            ],
            "type": "device"
        }"#;

        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.metadata.name, "Desk lamp");
        assert_eq!(device.services.len(), 3);
        assert_eq!(device.service(ResourceType::Light).unwrap().rid, "light-1");
        assert!(device.service(ResourceType::Motion).is_none());
        assert_eq!(device.services[2].rtype, ResourceType::Unknown);
    }
}
