//! Platform wire mapping (spec §4.4): name/id, type, category, NORAD id,
//! motion-source tag, and ECEF position (meters) round-trip.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{MotionSource, Platform, PlatformType, Vec3};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformWire {
    pub id: Option<String>,
    pub name: String,
    pub platform_type: String,
    pub category: Option<String>,
    pub norad_id: Option<u32>,
    pub motion_source: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Unknown motion-source strings map to `UNKNOWN` rather than rejecting.
pub fn from_wire(wire: &PlatformWire) -> Platform {
    Platform {
        id: wire.id.clone().unwrap_or_default(),
        name: wire.name.clone(),
        platform_type: PlatformType::from_wire_str(&wire.platform_type),
        motion_source: MotionSource::from_wire_str(&wire.motion_source),
        category: wire.category.clone(),
        norad_id: wire.norad_id,
        ecef_m: Vec3::new(wire.x, wire.y, wire.z),
        created_at: Utc::now(),
    }
}

pub fn to_wire(platform: &Platform) -> PlatformWire {
    PlatformWire {
        id: Some(platform.id.clone()),
        name: platform.name.clone(),
        platform_type: platform.platform_type.as_wire_str().to_string(),
        category: platform.category.clone(),
        norad_id: platform.norad_id,
        motion_source: platform.motion_source.as_wire_str().to_string(),
        x: platform.ecef_m.x,
        y: platform.ecef_m.y,
        z: platform.ecef_m.z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_on_the_specified_subset() {
        let wire = PlatformWire {
            id: Some("p1".into()),
            name: "ground-1".into(),
            platform_type: "GROUND_STATION".into(),
            category: Some("relay".into()),
            norad_id: Some(12345),
            motion_source: "UNKNOWN".into(),
            x: 6_371_000.0,
            y: 0.0,
            z: 0.0,
        };
        let domain = from_wire(&wire);
        let back = to_wire(&domain);
        assert_eq!(back.id, wire.id);
        assert_eq!(back.name, wire.name);
        assert_eq!(back.platform_type, wire.platform_type);
        assert_eq!(back.category, wire.category);
        assert_eq!(back.norad_id, wire.norad_id);
        assert_eq!(back.motion_source, wire.motion_source);
        assert_eq!(back.x, wire.x);
    }

    #[test]
    fn unknown_motion_source_string_maps_to_unknown() {
        let wire = PlatformWire {
            id: None,
            name: "p".into(),
            platform_type: "SATELLITE".into(),
            category: None,
            norad_id: None,
            motion_source: "GARBAGE".into(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        let domain = from_wire(&wire);
        assert_eq!(domain.motion_source, MotionSource::Unknown);
    }
}
