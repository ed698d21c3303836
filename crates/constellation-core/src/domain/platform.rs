use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vec3::Vec3;

/// Platform type tag. Known values are explicit; anything else round-trips
/// through `Other` rather than being rejected at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlatformType {
    Satellite,
    GroundStation,
    Aircraft,
    Other(String),
}

impl PlatformType {
    pub fn as_wire_str(&self) -> &str {
        match self {
            PlatformType::Satellite => "SATELLITE",
            PlatformType::GroundStation => "GROUND_STATION",
            PlatformType::Aircraft => "AIRCRAFT",
            PlatformType::Other(s) => s,
        }
    }

    pub fn from_wire_str(s: &str) -> Self {
        match s {
            "SATELLITE" => PlatformType::Satellite,
            "GROUND_STATION" => PlatformType::GroundStation,
            "AIRCRAFT" => PlatformType::Aircraft,
            other => PlatformType::Other(other.to_string()),
        }
    }
}

/// Source of platform motion truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionSource {
    Unknown,
    SpaceTrack,
}

impl Default for MotionSource {
    fn default() -> Self {
        MotionSource::Unknown
    }
}

impl MotionSource {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            MotionSource::Unknown => "UNKNOWN",
            MotionSource::SpaceTrack => "SPACETRACK",
        }
    }

    /// Unknown/unrecognized wire values map to `Unknown`, per spec.
    pub fn from_wire_str(s: &str) -> Self {
        match s {
            "SPACETRACK" => MotionSource::SpaceTrack,
            _ => MotionSource::Unknown,
        }
    }
}

/// A physical platform carrying zero or more network nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: String,
    pub name: String,
    pub platform_type: PlatformType,
    pub motion_source: MotionSource,
    pub category: Option<String>,
    pub norad_id: Option<u32>,
    /// ECEF position in meters.
    pub ecef_m: Vec3,
    pub created_at: DateTime<Utc>,
}
