//! Interface wire mapping (spec §4.4): `interface_id` is emitted in local
//! form; on input it may be either bare-local or `<parent>/<local>`.
//! Operational state is inferred from an attached impairment list — empty
//! means operational.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{Medium, NetworkInterface};
use crate::error::{CoreError, CoreResult};
use constellation_common::ids;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceWire {
    /// Bare local id, or `<parent>/<local>` if the caller already qualifies it.
    pub interface_id: String,
    pub medium: String,
    pub transceiver_id: Option<String>,
    pub mac: Option<String>,
    pub ip: Option<String>,
    /// Carried so the owning node's wire mapping can derive a consistent
    /// platform id across all of a node's interfaces (spec §4.4).
    pub platform_id: Option<String>,
    pub impairments: Vec<String>,
}

pub fn from_wire(wire: &InterfaceWire, parent_node_id: &str) -> CoreResult<NetworkInterface> {
    let (resolved_parent, local_id) = match ids::split_interface_id(&wire.interface_id) {
        Some((parent, local)) => (parent.to_string(), local.to_string()),
        None => (parent_node_id.to_string(), wire.interface_id.clone()),
    };
    if resolved_parent != parent_node_id {
        return Err(CoreError::InvalidInterface(format!(
            "interface id {} does not belong to node {}",
            wire.interface_id, parent_node_id
        )));
    }

    let medium = Medium::from_wire_str(&wire.medium).ok_or_else(|| {
        CoreError::InvalidInterface(format!("unknown medium: {}", wire.medium))
    })?;

    Ok(NetworkInterface {
        id: ids::interface_id(parent_node_id, &local_id),
        parent_node_id: parent_node_id.to_string(),
        local_id,
        medium,
        transceiver_id: wire.transceiver_id.clone(),
        mac: wire.mac.clone(),
        ip: wire.ip.clone(),
        operational: wire.impairments.is_empty(),
        link_ids: vec![],
        created_at: Utc::now(),
    })
}

pub fn to_wire(iface: &NetworkInterface, platform_id: Option<String>) -> InterfaceWire {
    InterfaceWire {
        interface_id: iface.local_id.clone(),
        medium: iface.medium.as_wire_str().to_string(),
        transceiver_id: iface.transceiver_id.clone(),
        mac: iface.mac.clone(),
        ip: iface.ip.clone(),
        platform_id,
        impairments: if iface.operational { vec![] } else { vec!["down".into()] },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_local_id_is_qualified_with_parent() {
        let wire = InterfaceWire {
            interface_id: "eth0".into(),
            medium: "WIRED".into(),
            transceiver_id: None,
            mac: None,
            ip: None,
            platform_id: None,
            impairments: vec![],
        };
        let iface = from_wire(&wire, "n1").unwrap();
        assert_eq!(iface.id, "n1/eth0");
    }

    #[test]
    fn qualified_id_must_match_parent() {
        let wire = InterfaceWire {
            interface_id: "n2/eth0".into(),
            medium: "WIRED".into(),
            transceiver_id: None,
            mac: None,
            ip: None,
            platform_id: None,
            impairments: vec![],
        };
        let err = from_wire(&wire, "n1").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInterface(_)));
    }

    #[test]
    fn nonempty_impairments_mark_non_operational() {
        let wire = InterfaceWire {
            interface_id: "eth0".into(),
            medium: "WIRED".into(),
            transceiver_id: None,
            mac: None,
            ip: None,
            platform_id: None,
            impairments: vec!["jammed".into()],
        };
        let iface = from_wire(&wire, "n1").unwrap();
        assert!(!iface.operational);
    }
}
