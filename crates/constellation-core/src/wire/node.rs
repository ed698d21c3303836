//! Node wire mapping (spec §4.4): node fields round-trip directly;
//! platform association is derived from interface bodies rather than
//! carried on the node itself.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::interface::{self, InterfaceWire};
use crate::domain::{NetworkInterface, NetworkNode, NodeType};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeWire {
    pub id: String,
    pub name: String,
    pub node_type: String,
    pub country_code: Option<String>,
    pub interfaces: Vec<InterfaceWire>,
}

/// Returns the node plus its mapped interfaces. Rejects with
/// `invalid_entity` if the wire interfaces disagree on a non-empty
/// platform id.
pub fn from_wire(wire: &NodeWire) -> CoreResult<(NetworkNode, Vec<NetworkInterface>)> {
    let mut platform_id: Option<String> = None;
    for iface in &wire.interfaces {
        if let Some(pid) = &iface.platform_id {
            if pid.is_empty() {
                continue;
            }
            match &platform_id {
                Some(existing) if existing != pid => {
                    return Err(CoreError::InvalidEntity(format!(
                        "node {} interfaces disagree on platform id: {} vs {}",
                        wire.id, existing, pid
                    )));
                }
                _ => platform_id = Some(pid.clone()),
            }
        }
    }

    let interfaces = wire
        .interfaces
        .iter()
        .map(|i| interface::from_wire(i, &wire.id))
        .collect::<CoreResult<Vec<_>>>()?;

    let node = NetworkNode {
        id: wire.id.clone(),
        name: wire.name.clone(),
        node_type: NodeType::from_wire_str(&wire.node_type),
        platform_id,
        country_code: wire.country_code.clone(),
        storage_capacity_bytes: None,
        provisioning_flags: vec![],
        created_at: Utc::now(),
    };
    Ok((node, interfaces))
}

pub fn to_wire(node: &NetworkNode, interfaces: &[NetworkInterface]) -> NodeWire {
    NodeWire {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.as_wire_str().to_string(),
        country_code: node.country_code.clone(),
        interfaces: interfaces
            .iter()
            .map(|i| interface::to_wire(i, node.platform_id.clone()))
            .collect(),
    }
}
