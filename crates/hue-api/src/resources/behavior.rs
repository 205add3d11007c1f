// Behavior scripts are bridge-provided automation templates; instances are
// configured uses of a script (e.g. "turn on hallway on motion").

use serde::{Deserialize, Serialize};

use super::{Metadata, Resource, ResourceType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorScript {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metadata: ScriptMetadata,
    #[serde(default)]
    pub version: Option<String>,
}

impl Resource for BehaviorScript {
    const RESOURCE_TYPE: ResourceType = ResourceType::BehaviorScript;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorInstance {
    pub id: String,
    pub script_id: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub configuration: serde_json::Value,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Resource for BehaviorInstance {
    const RESOURCE_TYPE: ResourceType = ResourceType::BehaviorInstance;
}
