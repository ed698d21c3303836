use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An absolute validity window for a flow requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A single QoS requirement within a service request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRequirement {
    pub requested_bps: u64,
    pub min_bps: u64,
    #[serde(with = "duration_secs")]
    pub max_latency: Duration,
    pub validity: Option<TimeInterval>,
}

/// A declared flow intent between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    pub src_node_id: String,
    pub dst_node_id: String,
    pub priority: i32,
    pub allow_partner: bool,
    pub disruption_tolerant: bool,
    pub requirements: Vec<FlowRequirement>,
    /// Set by Scenario State when src/dst resolve to distinct scheduling
    /// domains; see spec §4.3.
    pub cross_domain: bool,
    pub federation_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_secs_f64().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Ok(Duration::from_secs_f64(secs.max(0.0)))
    }
}
