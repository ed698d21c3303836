use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Network node type tag. `Router` is the only known value named in the
/// spec; anything else round-trips through `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeType {
    Router,
    Other(String),
}

impl NodeType {
    pub fn as_wire_str(&self) -> &str {
        match self {
            NodeType::Router => "ROUTER",
            NodeType::Other(s) => s,
        }
    }

    pub fn from_wire_str(s: &str) -> Self {
        match s {
            "ROUTER" => NodeType::Router,
            other => NodeType::Other(other.to_string()),
        }
    }
}

/// A logical network node bound to (at most) one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    pub node_type: NodeType,
    /// References a `Platform` by id; empty/absent is permitted (spec §9
    /// open question — unparented nodes/interfaces are accepted, not an error).
    pub platform_id: Option<String>,
    pub country_code: Option<String>,
    pub storage_capacity_bytes: Option<u64>,
    pub provisioning_flags: Vec<String>,
    pub created_at: DateTime<Utc>,
}
