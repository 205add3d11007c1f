// ── API-to-domain type conversions ──
//
// Bridges raw `hue_api` resources into canonical `hue_core::model` types.

use hue_api::{Device, ResourceType};

use crate::model::DeviceEntry;

impl From<&Device> for DeviceEntry {
    /// Service references are non-exclusive: one device may carry a light,
    /// a motion sensor, and its zigbee radio at once. Other service kinds
    /// are ignored.
    fn from(device: &Device) -> Self {
        let service_id = |rtype| device.service(rtype).map(|service| service.rid.clone());

        let mut entry = DeviceEntry::new(device.id.clone(), device.metadata.name.clone());
        entry.light_id = service_id(ResourceType::Light);
        entry.motion_id = service_id(ResourceType::Motion);
        entry.zigbee_connectivity_id = service_id(ResourceType::ZigbeeConnectivity);
        entry
    }
}

#[cfg(test)]
mod tests {
    use hue_api::{Metadata, ResourceRef};

    use super::*;

    fn device(services: Vec<ResourceRef>) -> Device {
        Device {
            id: "dev-1".into(),
            id_v1: None,
            metadata: Metadata {
                name: "Hallway".into(),
                archetype: None,
            },
            product_data: None,
            services,
        }
    }

    #[test]
    fn collects_every_known_service() {
        let entry = DeviceEntry::from(&device(vec![
            ResourceRef::new("light-1", ResourceType::Light),
            ResourceRef::new("motion-1", ResourceType::Motion),
            ResourceRef::new("zb-1", ResourceType::ZigbeeConnectivity),
            ResourceRef::new("power-1", ResourceType::DevicePower),
        ]));

        assert_eq!(entry.device_id, "dev-1");
        assert_eq!(entry.name, "Hallway");
        assert_eq!(entry.light_id.as_deref(), Some("light-1"));
        assert_eq!(entry.motion_id.as_deref(), Some("motion-1"));
        assert_eq!(entry.zigbee_connectivity_id.as_deref(), Some("zb-1"));
        assert!(entry.mac_address.is_none());
    }

    #[test]
    fn device_without_services_has_no_capabilities() {
        let entry = DeviceEntry::from(&device(Vec::new()));
        assert!(!entry.is_light());
        assert!(!entry.is_motion());
        assert!(entry.zigbee_connectivity_id.is_none());
    }
}
