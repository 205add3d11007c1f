use serde::{Deserialize, Serialize};

use super::{Metadata, Resource, ResourceRef, ResourceType};

/// A stored lighting state for a room or zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub group: ResourceRef,
    #[serde(default)]
    pub actions: Vec<SceneAction>,
}

impl Resource for Scene {
    const RESOURCE_TYPE: ResourceType = ResourceType::Scene;
}

/// Per-light action; the body is kept verbatim since its schema varies
/// with the light's capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAction {
    pub target: ResourceRef,
    #[serde(default)]
    pub action: serde_json::Value,
}
