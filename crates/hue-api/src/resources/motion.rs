use serde::{Deserialize, Serialize};

use super::{Resource, ResourceRef, ResourceType};

/// Motion service of a sensor device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub id: String,
    pub owner: ResourceRef,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub motion: Option<MotionReport>,
}

impl Resource for Motion {
    const RESOURCE_TYPE: ResourceType = ResourceType::Motion;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionReport {
    #[serde(default)]
    pub motion: Option<bool>,
    #[serde(default)]
    pub motion_valid: Option<bool>,
}
