// Rooms and zones share the same shape: a named set of children plus the
// grouped services the bridge creates for them.

use serde::{Deserialize, Serialize};

use super::{Metadata, Resource, ResourceRef, ResourceType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub children: Vec<ResourceRef>,
    #[serde(default)]
    pub services: Vec<ResourceRef>,
}

impl Resource for Room {
    const RESOURCE_TYPE: ResourceType = ResourceType::Room;
}

/// Unlike rooms, zone children are lights rather than devices, and a light
/// may belong to several zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub children: Vec<ResourceRef>,
    #[serde(default)]
    pub services: Vec<ResourceRef>,
}

impl Resource for Zone {
    const RESOURCE_TYPE: ResourceType = ResourceType::Zone;
}
