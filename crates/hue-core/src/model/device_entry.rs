use serde::{Deserialize, Serialize};

use super::MacAddress;

/// One physical device, merged from the device registry and the zigbee
/// connectivity registry. Identified by `device_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub device_id: String,
    pub name: String,
    pub light_id: Option<String>,
    pub zigbee_connectivity_id: Option<String>,
    pub motion_id: Option<String>,
    /// Set once a connectivity record owned by this device is seen.
    pub mac_address: Option<MacAddress>,
}

impl DeviceEntry {
    pub fn new(device_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_light(&self) -> bool {
        self.light_id.is_some()
    }

    pub fn is_motion(&self) -> bool {
        self.motion_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_follow_service_ids() {
        let mut entry = DeviceEntry::new("dev-1", "Hallway sensor");
        assert!(!entry.is_light());
        assert!(!entry.is_motion());

        entry.motion_id = Some("motion-1".into());
        assert!(entry.is_motion());
        assert!(!entry.is_light());
    }
}
