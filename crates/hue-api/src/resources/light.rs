use serde::{Deserialize, Serialize};

use super::{Metadata, Resource, ResourceRef, ResourceType};

/// Light service of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub id: String,
    pub owner: ResourceRef,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub on: Option<OnState>,
    #[serde(default)]
    pub dimming: Option<Dimming>,
    #[serde(default)]
    pub color_temperature: Option<ColorTemperature>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl Resource for Light {
    const RESOURCE_TYPE: ResourceType = ResourceType::Light;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnState {
    pub on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimming {
    pub brightness: f64,
}

/// Color temperature in mirek; `None` while the light is in color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTemperature {
    #[serde(default)]
    pub mirek: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub xy: Xy,
}

/// CIE 1931 chromaticity coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}
