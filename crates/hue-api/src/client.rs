// CLIP v2 HTTP client
//
// Wraps `reqwest::Client` with bridge URL construction and envelope
// unwrapping. Every resource family is served by a typed
// `ResourceService<T>` sharing one connection pool, so this module stays
// focused on transport mechanics.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::resources::{
    BehaviorInstanceService, BehaviorScriptService, DeviceService, LightService, MotionService,
    ResourceService, RoomService, SceneService, ZigbeeConnectivityService, ZoneService,
};
use crate::transport::TransportConfig;

/// Header carrying the application key on every CLIP v2 request.
pub const APPLICATION_KEY_HEADER: &str = "hue-application-key";

// ── Envelope ─────────────────────────────────────────────────────────

/// CLIP v2 wraps every response as `{ "errors": [...], "data": [...] }`.
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    errors: Vec<EnvelopeError>,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Deserialize)]
struct ErrorsOnly {
    #[serde(default)]
    errors: Vec<EnvelopeError>,
}

#[derive(Deserialize)]
struct EnvelopeError {
    description: String,
}

fn join_descriptions(errors: &[EnvelopeError]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    Some(
        errors
            .iter()
            .map(|e| e.description.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    )
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

// ── Transport wrapper ────────────────────────────────────────────────

/// Shared HTTP state behind every resource service.
pub(crate) struct BridgeHttp {
    http: reqwest::Client,
    base_url: Url,
}

impl BridgeHttp {
    /// Build `{base}/clip/v2/resource/{path}`.
    pub(crate) fn resource_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("clip/v2/resource/{path}"))?)
    }

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        parse_envelope(resp).await
    }
}

/// Parse the `{ errors, data }` envelope, returning `data` on success.
///
/// A 2xx response that carries errors but no data is treated as a failure;
/// errors alongside data are logged and the data is returned.
async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Vec<T>, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            message: format!("bridge rejected the application key (HTTP {status})"),
        });
    }

    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorsOnly>(&body)
            .ok()
            .and_then(|e| join_descriptions(&e.errors))
            .unwrap_or_else(|| preview(&body));
        return Err(Error::Bridge {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })?;

    if let Some(message) = join_descriptions(&envelope.errors) {
        if envelope.data.is_empty() {
            return Err(Error::Bridge {
                status: status.as_u16(),
                message,
            });
        }
        warn!(errors = %message, "bridge returned data with errors");
    }

    Ok(envelope.data)
}

/// Accept `192.168.1.2`, `bridge.local`, or a full `https://…` URL.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let raw = raw.trim();
    let mut url = if raw.contains("://") {
        Url::parse(raw)?
    } else {
        Url::parse(&format!("https://{raw}"))?
    };

    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

// ── Capability interface ─────────────────────────────────────────────

/// One accessor per bridge service family.
///
/// Implemented by [`HueClient`] and by wrappers that add behaviour on top
/// of a client while forwarding every accessor unchanged.
pub trait HueServiceClient: Send + Sync {
    fn light_service(&self) -> &LightService;
    fn room_service(&self) -> &RoomService;
    fn zone_service(&self) -> &ZoneService;
    fn scene_service(&self) -> &SceneService;
    fn device_service(&self) -> &DeviceService;
    fn zigbee_connectivity_service(&self) -> &ZigbeeConnectivityService;
    fn behavior_instance_service(&self) -> &BehaviorInstanceService;
    fn behavior_script_service(&self) -> &BehaviorScriptService;
    fn motion_service(&self) -> &MotionService;
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for a single Hue bridge.
pub struct HueClient {
    http: Arc<BridgeHttp>,
    lights: LightService,
    rooms: RoomService,
    zones: ZoneService,
    scenes: SceneService,
    devices: DeviceService,
    zigbee_connectivity: ZigbeeConnectivityService,
    behavior_instances: BehaviorInstanceService,
    behavior_scripts: BehaviorScriptService,
    motion: MotionService,
}

impl HueClient {
    /// Build from an application key and transport config.
    ///
    /// Injects `hue-application-key` as a sensitive default header on
    /// every request. `bridge` may be a bare host/IP or a full URL.
    pub fn from_application_key(
        bridge: &str,
        application_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(application_key.expose_secret()).map_err(|e| {
            Error::Authentication {
                message: format!("invalid application key header value: {e}"),
            }
        })?;
        key_value.set_sensitive(true);
        headers.insert(APPLICATION_KEY_HEADER, key_value);

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(bridge, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(bridge: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(bridge)?;
        let http = Arc::new(BridgeHttp { http, base_url });

        Ok(Self {
            lights: ResourceService::new(Arc::clone(&http)),
            rooms: ResourceService::new(Arc::clone(&http)),
            zones: ResourceService::new(Arc::clone(&http)),
            scenes: ResourceService::new(Arc::clone(&http)),
            devices: ResourceService::new(Arc::clone(&http)),
            zigbee_connectivity: ResourceService::new(Arc::clone(&http)),
            behavior_instances: ResourceService::new(Arc::clone(&http)),
            behavior_scripts: ResourceService::new(Arc::clone(&http)),
            motion: ResourceService::new(Arc::clone(&http)),
            http,
        })
    }

    /// The bridge base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.http.base_url
    }
}

// The application key lives in the reqwest default headers, so only the
// bridge address is printed.
impl fmt::Debug for HueClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HueClient")
            .field("base_url", &self.http.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HueServiceClient for HueClient {
    fn light_service(&self) -> &LightService {
        &self.lights
    }

    fn room_service(&self) -> &RoomService {
        &self.rooms
    }

    fn zone_service(&self) -> &ZoneService {
        &self.zones
    }

    fn scene_service(&self) -> &SceneService {
        &self.scenes
    }

    fn device_service(&self) -> &DeviceService {
        &self.devices
    }

    fn zigbee_connectivity_service(&self) -> &ZigbeeConnectivityService {
        &self.zigbee_connectivity
    }

    fn behavior_instance_service(&self) -> &BehaviorInstanceService {
        &self.behavior_instances
    }

    fn behavior_script_service(&self) -> &BehaviorScriptService {
        &self.behavior_scripts
    }

    fn motion_service(&self) -> &MotionService {
        &self.motion
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https_scheme() {
        let url = normalize_base_url("192.168.1.20").unwrap();
        assert_eq!(url.as_str(), "https://192.168.1.20/");
    }

    #[test]
    fn full_url_keeps_scheme_and_port() {
        let url = normalize_base_url("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn resource_url_is_under_clip_v2() {
        let client = HueClient::from_reqwest("bridge.local", reqwest::Client::new()).unwrap();
        let url = client.http.resource_url("device").unwrap();
        assert_eq!(url.as_str(), "https://bridge.local/clip/v2/resource/device");
    }

    #[test]
    fn debug_output_hides_application_key() {
        let key = SecretString::from("super-secret-key".to_owned());
        let client =
            HueClient::from_application_key("192.168.1.20", &key, &TransportConfig::default())
                .unwrap();
        let printed = format!("{client:?}");
        assert!(printed.contains("https://192.168.1.20/"), "{printed}");
        assert!(!printed.contains("super-secret-key"), "{printed}");
    }

    #[test]
    fn error_descriptions_are_joined() {
        let errors = vec![
            EnvelopeError {
                description: "first".into(),
            },
            EnvelopeError {
                description: "second".into(),
            },
        ];
        assert_eq!(join_descriptions(&errors).as_deref(), Some("first; second"));
        assert!(join_descriptions(&[]).is_none());
    }
}
