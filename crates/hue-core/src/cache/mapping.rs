// ── Device mapping builder ──
//
// Joins the device registry with the zigbee connectivity registry on the
// connectivity record's owner id. Each record only ever touches its own
// owner's entry, so the join is independent of record order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use hue_api::{Device, HueServiceClient, ZigbeeConnectivity};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{DeviceEntry, MacAddress};

/// The correlated view of every device on the bridge.
#[derive(Debug, Clone, Default)]
pub struct DeviceMapping {
    devices: HashMap<String, DeviceEntry>,
    unresolved: Vec<ZigbeeConnectivity>,
}

impl DeviceMapping {
    /// Fuse both inventories. Connectivity records whose owner is not a
    /// known device are kept aside as unresolved, never merged.
    pub fn correlate(devices: &[Device], connectivity: Vec<ZigbeeConnectivity>) -> Self {
        let mut map: HashMap<String, DeviceEntry> = HashMap::with_capacity(devices.len());
        for device in devices {
            match map.entry(device.id.clone()) {
                Entry::Occupied(mut slot) => {
                    warn!(device_id = %device.id, "duplicate device id in inventory, keeping last");
                    slot.insert(DeviceEntry::from(device));
                }
                Entry::Vacant(slot) => {
                    slot.insert(DeviceEntry::from(device));
                }
            }
        }

        let mut unresolved = Vec::new();
        for record in connectivity {
            match map.get_mut(&record.owner.rid) {
                Some(entry) => {
                    let mac = MacAddress::new(&record.mac_address);
                    // An empty address never clears one set by another record.
                    if !mac.is_empty() {
                        entry.mac_address = Some(mac);
                    }
                }
                None => unresolved.push(record),
            }
        }

        Self {
            devices: map,
            unresolved,
        }
    }

    pub fn get(&self, device_id: &str) -> Option<&DeviceEntry> {
        self.devices.get(device_id)
    }

    /// Entry carrying `mac`. Should two devices ever report the same
    /// address, the lowest device id wins so repeated lookups agree.
    pub fn find_by_mac(&self, mac: &MacAddress) -> Option<&DeviceEntry> {
        self.devices
            .values()
            .filter(|entry| entry.mac_address.as_ref() == Some(mac))
            .min_by(|a, b| a.device_id.cmp(&b.device_id))
    }

    /// Every entry, ordered by name (byte-wise, case-sensitive). Ties are
    /// broken by device id so the order is the same on every call.
    pub fn sorted_entries(&self) -> Vec<DeviceEntry> {
        let mut entries: Vec<DeviceEntry> = self.devices.values().cloned().collect();
        entries.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.device_id.cmp(&b.device_id))
        });
        entries
    }

    /// Connectivity records whose owner matched no device.
    pub fn unresolved(&self) -> &[ZigbeeConnectivity] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Await a bridge call unless `cancel` fires first.
pub(crate) async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, hue_api::Error>>,
) -> Result<T, CoreError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CoreError::Cancelled),
        res = fut => res.map_err(CoreError::from),
    }
}

/// Fetch both inventories and correlate them.
///
/// Either fetch failing (or `cancel` firing) fails the whole build; nothing
/// partial is returned.
pub(crate) async fn build_device_mapping<C>(
    client: &C,
    cancel: &CancellationToken,
) -> Result<DeviceMapping, CoreError>
where
    C: HueServiceClient + ?Sized,
{
    debug!("fetching device and zigbee connectivity inventories");
    let (devices, connectivity) = cancellable(cancel, async {
        tokio::try_join!(
            client.device_service().list(),
            client.zigbee_connectivity_service().list(),
        )
    })
    .await?;

    let mapping = DeviceMapping::correlate(&devices, connectivity);

    for record in mapping.unresolved() {
        warn!(
            owner = %record.owner.rid,
            owner_type = %record.owner.rtype,
            mac = %record.mac_address,
            "zigbee connectivity owner matches no device"
        );
    }
    info!(
        devices = mapping.len(),
        unresolved = mapping.unresolved().len(),
        "built device mapping"
    );

    Ok(mapping)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hue_api::{Metadata, ResourceRef, ResourceType};

    use super::*;

    fn device(id: &str, name: &str, services: &[(&str, ResourceType)]) -> Device {
        Device {
            id: id.into(),
            id_v1: None,
            metadata: Metadata {
                name: name.into(),
                archetype: None,
            },
            product_data: None,
            services: services
                .iter()
                .map(|(rid, rtype)| ResourceRef::new(*rid, *rtype))
                .collect(),
        }
    }

    fn zigbee(id: &str, owner: &str, mac: &str) -> ZigbeeConnectivity {
        ZigbeeConnectivity {
            id: id.into(),
            owner: ResourceRef::new(owner, ResourceType::Device),
            mac_address: mac.into(),
            status: Some("connected".into()),
        }
    }

    fn scenario() -> DeviceMapping {
        DeviceMapping::correlate(
            &[
                device("D1", "Lamp", &[("L1", ResourceType::Light)]),
                device("D2", "Sensor", &[("M1", ResourceType::Motion)]),
            ],
            vec![
                zigbee("Z1", "D1", "AA:BB:CC:DD:EE:FF"),
                zigbee("Z9", "D9", "00:11:22:33:44:55"),
            ],
        )
    }

    #[test]
    fn matched_record_sets_owner_mac() {
        let mapping = scenario();
        let lamp = mapping.get("D1").unwrap();
        assert_eq!(
            lamp.mac_address.as_ref().map(MacAddress::as_str),
            Some("aa:bb:cc:dd:ee:ff")
        );
        assert!(mapping.get("D2").unwrap().mac_address.is_none());
    }

    #[test]
    fn unmatched_record_is_unresolved_and_touches_nothing() {
        let mapping = scenario();
        assert_eq!(mapping.unresolved().len(), 1);
        assert_eq!(mapping.unresolved()[0].owner.rid, "D9");

        let stray = MacAddress::new("00:11:22:33:44:55");
        assert!(mapping.find_by_mac(&stray).is_none());
    }

    #[test]
    fn one_entry_per_device_id() {
        let mapping = DeviceMapping::correlate(
            &[
                device("D1", "Old name", &[]),
                device("D1", "New name", &[("L1", ResourceType::Light)]),
                device("D2", "Other", &[]),
            ],
            Vec::new(),
        );
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("D1").unwrap().name, "New name");
    }

    #[test]
    fn join_is_order_independent() {
        let devices = [
            device("D1", "Lamp", &[("L1", ResourceType::Light)]),
            device("D2", "Strip", &[("L2", ResourceType::Light)]),
        ];
        let records = vec![
            zigbee("Z1", "D1", "aa:aa:aa:aa:aa:aa"),
            zigbee("Z2", "D2", "bb:bb:bb:bb:bb:bb"),
            zigbee("Z3", "D7", "cc:cc:cc:cc:cc:cc"),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = DeviceMapping::correlate(&devices, records);
        let backward = DeviceMapping::correlate(&devices, reversed);

        assert_eq!(forward.sorted_entries(), backward.sorted_entries());
        assert_eq!(forward.unresolved().len(), backward.unresolved().len());
    }

    #[test]
    fn sorted_by_name_case_sensitive() {
        let mapping = DeviceMapping::correlate(
            &[
                device("D1", "lamp", &[]),
                device("D2", "Sensor", &[]),
                device("D3", "Lamp", &[]),
                device("D4", "", &[]),
            ],
            Vec::new(),
        );
        let names: Vec<String> = mapping.sorted_entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["", "Lamp", "Sensor", "lamp"]);
    }

    #[test]
    fn duplicate_mac_resolves_to_lowest_device_id() {
        let mapping = DeviceMapping::correlate(
            &[device("D2", "B", &[]), device("D1", "A", &[])],
            vec![
                zigbee("Z2", "D2", "aa:aa:aa:aa:aa:aa"),
                zigbee("Z1", "D1", "AA:AA:AA:AA:AA:AA"),
            ],
        );
        let found = mapping
            .find_by_mac(&MacAddress::new("aa:aa:aa:aa:aa:aa"))
            .unwrap();
        assert_eq!(found.device_id, "D1");
    }

    #[test]
    fn empty_mac_is_not_recorded() {
        let mapping = DeviceMapping::correlate(
            &[device("D1", "Lamp", &[])],
            vec![zigbee("Z1", "D1", "")],
        );
        assert!(mapping.get("D1").unwrap().mac_address.is_none());
        assert!(mapping.unresolved().is_empty());
    }

    #[test]
    fn empty_mac_does_not_clear_earlier_mac() {
        let devices = [device("D1", "Lamp", &[("L1", ResourceType::Light)])];
        let records = vec![zigbee("Z1", "D1", "aa:bb"), zigbee("Z2", "D1", "")];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = DeviceMapping::correlate(&devices, records);
        let backward = DeviceMapping::correlate(&devices, reversed);

        assert_eq!(forward.sorted_entries(), backward.sorted_entries());
        assert_eq!(
            forward.get("D1").unwrap().mac_address.as_ref().map(MacAddress::as_str),
            Some("aa:bb")
        );
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result: Result<(), CoreError> =
            cancellable(&cancel, std::future::pending::<Result<(), hue_api::Error>>()).await;
        assert!(matches!(result, Err(CoreError::Cancelled)));
    }
}
