// hue-api: Async Rust client for the Philips Hue bridge CLIP v2 API

pub mod client;
pub mod error;
pub mod resources;
pub mod transport;

pub use client::{APPLICATION_KEY_HEADER, HueClient, HueServiceClient};
pub use error::Error;
pub use resources::{
    BehaviorInstance, BehaviorInstanceService, BehaviorScript, BehaviorScriptService, Device,
    DeviceService, Light, LightService, Metadata, Motion, MotionService, Resource, ResourceRef,
    ResourceService, ResourceType, Room, RoomService, Scene, SceneService, ZigbeeConnectivity,
    ZigbeeConnectivityService, Zone, ZoneService,
};
pub use transport::{TlsMode, TransportConfig};
