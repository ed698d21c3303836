use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Physical/link-layer medium of an interface or link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medium {
    Wired,
    Wireless,
}

impl Medium {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Medium::Wired => "WIRED",
            Medium::Wireless => "WIRELESS",
        }
    }

    pub fn from_wire_str(s: &str) -> Option<Medium> {
        match s {
            "WIRED" => Some(Medium::Wired),
            "WIRELESS" => Some(Medium::Wireless),
            _ => None,
        }
    }
}

/// A network interface, globally identified as `<node_id>/<local_id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// `<parent_node_id>/<local_id>`.
    pub id: String,
    pub parent_node_id: String,
    pub local_id: String,
    pub medium: Medium,
    /// Required (non-empty, resolvable) when `medium == Wireless`.
    pub transceiver_id: Option<String>,
    pub mac: Option<String>,
    pub ip: Option<String>,
    pub operational: bool,
    /// Reverse index: directional link ids this interface participates in,
    /// as either endpoint A or endpoint B.
    pub link_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Read-only reference data for a wireless transceiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransceiverModel {
    pub id: String,
    pub frequency_band: String,
    pub max_range_m: f64,
}
