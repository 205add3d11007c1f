// ── Caching facade over a bridge client ──
//
// Wraps any `HueServiceClient` and answers identity questions (MAC -> light,
// MAC -> motion sensor, script name -> id) from a device mapping that is
// built at most once per facade. Every other service call passes straight
// through to the wrapped client.

use std::sync::Arc;

use hue_api::{
    BehaviorInstanceService, BehaviorScript, BehaviorScriptService, DeviceService, HueClient,
    HueServiceClient, LightService, MotionService, RoomService, SceneService,
    ZigbeeConnectivity, ZigbeeConnectivityService, ZoneService,
};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::mapping::{DeviceMapping, build_device_mapping, cancellable};
use super::result_cache::ResultCache;
use crate::error::CoreError;
use crate::model::{DeviceEntry, MacAddress};

/// Caching client for device identity lookups.
///
/// The device mapping is built lazily by the first lookup that needs it.
/// The build runs under a mutex, so concurrent first callers share a single
/// pair of inventory fetches. A failed build leaves nothing behind and the
/// next lookup tries again. Once built, the mapping is kept for the life
/// of the facade.
pub struct CachedClient<C = HueClient> {
    client: C,
    devices: Mutex<Option<Arc<DeviceMapping>>>,
    scripts: ResultCache<BehaviorScript>,
    cancel: CancellationToken,
}

impl<C: HueServiceClient> CachedClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            devices: Mutex::new(None),
            scripts: ResultCache::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Like [`new`](Self::new), but inventory fetches give up with
    /// [`CoreError::Cancelled`] once `parent` is cancelled.
    pub fn with_cancellation(client: C, parent: &CancellationToken) -> Self {
        Self {
            cancel: parent.child_token(),
            ..Self::new(client)
        }
    }

    /// Whether the device mapping has been built.
    pub async fn is_built(&self) -> bool {
        self.devices.lock().await.is_some()
    }

    /// Run `f` against the device mapping, building it first if needed.
    ///
    /// The lock is held for the duration of `f`, so readers never observe a
    /// mapping mid-construction.
    async fn with_mapping<T>(
        &self,
        f: impl FnOnce(&DeviceMapping) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut guard = self.devices.lock().await;
        if guard.is_none() {
            let mapping = build_device_mapping(&self.client, &self.cancel).await?;
            *guard = Some(Arc::new(mapping));
        }
        match guard.as_deref() {
            Some(mapping) => f(mapping),
            None => Err(CoreError::Internal("device mapping missing after build".into())),
        }
    }

    /// Light service id of the device whose radio reports `mac`.
    ///
    /// The comparison ignores ASCII case and surrounding whitespace, so
    /// `" AA:BB:CC "` finds a radio reported as `aa:bb:cc`. Separators are
    /// compared as given.
    pub async fn light_id_for_mac(&self, mac: &str) -> Result<String, CoreError> {
        let mac = MacAddress::new(mac);
        self.with_mapping(|mapping| {
            let entry = entry_for_mac(mapping, &mac)?;
            entry
                .light_id
                .clone()
                .ok_or_else(|| missing_service(entry, &mac, "light"))
        })
        .await
    }

    /// Motion service id of the device whose radio reports `mac`.
    /// Matching follows [`light_id_for_mac`](Self::light_id_for_mac).
    pub async fn motion_id_for_mac(&self, mac: &str) -> Result<String, CoreError> {
        let mac = MacAddress::new(mac);
        self.with_mapping(|mapping| {
            let entry = entry_for_mac(mapping, &mac)?;
            entry
                .motion_id
                .clone()
                .ok_or_else(|| missing_service(entry, &mac, "motion"))
        })
        .await
    }

    /// Every correlated device sorted by name, plus the connectivity
    /// records whose owner matched no device.
    pub async fn all_devices(
        &self,
    ) -> Result<(Vec<DeviceEntry>, Vec<ZigbeeConnectivity>), CoreError> {
        self.with_mapping(|mapping| {
            Ok((mapping.sorted_entries(), mapping.unresolved().to_vec()))
        })
        .await
    }

    /// Id of the behavior script called `name` (exact match).
    ///
    /// A name missing from the cache triggers a full re-fetch of the script
    /// inventory, which replaces every cached name.
    pub async fn behavior_script_id_for_name(&self, name: &str) -> Result<String, CoreError> {
        let found = self
            .scripts
            .get_or_refresh(name, || async {
                debug!("refreshing behavior script inventory");
                let scripts =
                    cancellable(&self.cancel, self.client.behavior_script_service().list())
                        .await?;
                Ok::<_, CoreError>(
                    scripts
                        .into_iter()
                        .map(|script| (script.metadata.name.clone(), script))
                        .collect(),
                )
            })
            .await?;

        found.map(|script| script.id).ok_or_else(|| CoreError::NotFound {
            entity_type: "behavior script".into(),
            identifier: name.to_owned(),
        })
    }

    /// Names currently held in the script cache, sorted.
    pub async fn cached_script_names(&self) -> Vec<String> {
        self.scripts.keys().await
    }
}

fn entry_for_mac<'a>(
    mapping: &'a DeviceMapping,
    mac: &MacAddress,
) -> Result<&'a DeviceEntry, CoreError> {
    mapping
        .find_by_mac(mac)
        .ok_or_else(|| CoreError::DeviceNotFound {
            identifier: format!("MAC address {mac}"),
        })
}

fn missing_service(entry: &DeviceEntry, mac: &MacAddress, service: &'static str) -> CoreError {
    CoreError::MissingService {
        mac: mac.to_string(),
        device_id: entry.device_id.clone(),
        service,
    }
}

// ── Pass-through ─────────────────────────────────────────────────────

impl<C: HueServiceClient> HueServiceClient for CachedClient<C> {
    fn light_service(&self) -> &LightService {
        self.client.light_service()
    }

    fn room_service(&self) -> &RoomService {
        self.client.room_service()
    }

    fn zone_service(&self) -> &ZoneService {
        self.client.zone_service()
    }

    fn scene_service(&self) -> &SceneService {
        self.client.scene_service()
    }

    fn device_service(&self) -> &DeviceService {
        self.client.device_service()
    }

    fn zigbee_connectivity_service(&self) -> &ZigbeeConnectivityService {
        self.client.zigbee_connectivity_service()
    }

    fn behavior_instance_service(&self) -> &BehaviorInstanceService {
        self.client.behavior_instance_service()
    }

    fn behavior_script_service(&self) -> &BehaviorScriptService {
        self.client.behavior_script_service()
    }

    fn motion_service(&self) -> &MotionService {
        self.client.motion_service()
    }
}
