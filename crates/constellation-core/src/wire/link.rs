//! Link wire mapping (spec §4.4): directional links support both the
//! current explicit endpoint fields and a deprecated compound form;
//! bidirectional links on the wire merge/split into one or two directional
//! links internally.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{Medium, NetworkLink};
use crate::error::{CoreError, CoreResult};
use constellation_common::ids;

/// A single directional link as seen on the wire. Current callers set
/// `{src,dst}_network_node_id` + `{src,dst}_interface_id`; legacy callers
/// set only `{src,dst}_compound` (a pre-joined `<node>/<local>` string).
/// Mapping prefers the explicit pair and only consults the compound when
/// either half of it is absent (spec §9).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinkWire {
    pub src_network_node_id: Option<String>,
    pub src_interface_id: Option<String>,
    pub src_compound: Option<String>,
    pub dst_network_node_id: Option<String>,
    pub dst_interface_id: Option<String>,
    pub dst_compound: Option<String>,
    pub medium: String,
    pub status: Option<String>,
    pub is_up: Option<bool>,
    pub max_bandwidth_bps: u64,
    pub available_bandwidth_bps: Option<u64>,
}

fn resolve_endpoint(
    node_id: Option<&str>,
    interface_local_id: Option<&str>,
    compound: Option<&str>,
) -> CoreResult<String> {
    match (node_id, interface_local_id) {
        (Some(n), Some(i)) if !n.is_empty() && !i.is_empty() => Ok(ids::interface_id(n, i)),
        _ => compound
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string())
            .ok_or_else(|| CoreError::InvalidLink("link endpoint could not be resolved".into())),
    }
}

pub fn from_wire(wire: &LinkWire) -> CoreResult<NetworkLink> {
    let a = resolve_endpoint(
        wire.src_network_node_id.as_deref(),
        wire.src_interface_id.as_deref(),
        wire.src_compound.as_deref(),
    )?;
    let b = resolve_endpoint(
        wire.dst_network_node_id.as_deref(),
        wire.dst_interface_id.as_deref(),
        wire.dst_compound.as_deref(),
    )?;
    let medium = Medium::from_wire_str(&wire.medium)
        .ok_or_else(|| CoreError::InvalidLink(format!("unknown medium: {}", wire.medium)))?;

    let id = ids::directional_link_id(&a, &b);
    let now = Utc::now();
    let mut link = match medium {
        Medium::Wired => NetworkLink::new_wired(id, a, b, wire.max_bandwidth_bps, now),
        Medium::Wireless => NetworkLink::new_wireless(id, a, b, wire.max_bandwidth_bps, now),
    };

    // An explicit status/is_up on the wire overrides the medium-derived
    // birth state — used by Update, never by Create of a fresh pair.
    if let Some(status) = wire.status.as_deref().and_then(crate::domain::LinkStatus::from_wire_str) {
        link.status = status;
    }
    if let Some(is_up) = wire.is_up {
        link.is_up = is_up;
    }
    if let Some(available) = wire.available_bandwidth_bps {
        link.available_bandwidth_bps = available;
    }
    Ok(link)
}

pub fn to_wire(link: &NetworkLink) -> LinkWire {
    let (a_node, a_local) = ids::split_interface_id(&link.a_interface_id)
        .unwrap_or((link.a_interface_id.as_str(), ""));
    let (b_node, b_local) = ids::split_interface_id(&link.b_interface_id)
        .unwrap_or((link.b_interface_id.as_str(), ""));

    LinkWire {
        src_network_node_id: Some(a_node.to_string()),
        src_interface_id: Some(a_local.to_string()),
        src_compound: Some(link.a_interface_id.clone()),
        dst_network_node_id: Some(b_node.to_string()),
        dst_interface_id: Some(b_local.to_string()),
        dst_compound: Some(link.b_interface_id.clone()),
        medium: link.medium.as_wire_str().to_string(),
        status: Some(link.status.as_wire_str().to_string()),
        is_up: Some(link.is_up),
        max_bandwidth_bps: link.max_bandwidth_bps,
        available_bandwidth_bps: Some(link.available_bandwidth_bps),
    }
}

/// The external bidirectional abstraction: A/B node ids plus tx/rx
/// interface local ids on each side (spec §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidirectionalLinkWire {
    pub a_node_id: String,
    pub b_node_id: String,
    pub a_tx_interface_id: String,
    pub a_rx_interface_id: Option<String>,
    pub b_tx_interface_id: String,
    pub b_rx_interface_id: Option<String>,
    pub medium: String,
    pub max_bandwidth_bps: u64,
}

/// Always produces both halves: the A→B directional link (A's tx to B's
/// rx) and the B→A directional link (B's tx to A's rx). When a side omits
/// its rx id, its tx interface is reused for both directions.
pub fn from_wire_bidirectional(wire: &BidirectionalLinkWire) -> CoreResult<(NetworkLink, NetworkLink)> {
    let medium = Medium::from_wire_str(&wire.medium)
        .ok_or_else(|| CoreError::InvalidLink(format!("unknown medium: {}", wire.medium)))?;

    let a_tx = ids::interface_id(&wire.a_node_id, &wire.a_tx_interface_id);
    let a_rx_local = wire.a_rx_interface_id.as_deref().unwrap_or(&wire.a_tx_interface_id);
    let a_rx = ids::interface_id(&wire.a_node_id, a_rx_local);
    let b_tx = ids::interface_id(&wire.b_node_id, &wire.b_tx_interface_id);
    let b_rx_local = wire.b_rx_interface_id.as_deref().unwrap_or(&wire.b_tx_interface_id);
    let b_rx = ids::interface_id(&wire.b_node_id, b_rx_local);

    if a_tx == b_rx || b_tx == a_rx {
        return Err(CoreError::InvalidLink(
            "bidirectional link endpoints must be distinct".into(),
        ));
    }

    let now = Utc::now();
    let fwd_id = ids::directional_link_id(&a_tx, &b_rx);
    let rev_id = ids::directional_link_id(&b_tx, &a_rx);
    let (fwd, rev) = match medium {
        Medium::Wired => (
            NetworkLink::new_wired(fwd_id, a_tx, b_rx, wire.max_bandwidth_bps, now),
            NetworkLink::new_wired(rev_id, b_tx, a_rx, wire.max_bandwidth_bps, now),
        ),
        Medium::Wireless => (
            NetworkLink::new_wireless(fwd_id, a_tx, b_rx, wire.max_bandwidth_bps, now),
            NetworkLink::new_wireless(rev_id, b_tx, a_rx, wire.max_bandwidth_bps, now),
        ),
    };
    Ok((fwd, rev))
}

/// Merge one directional link (the A→B half) and, if present, its reverse
/// (the B→A half) back into the external bidirectional shape.
pub fn to_wire_bidirectional(forward: &NetworkLink, reverse: Option<&NetworkLink>) -> BidirectionalLinkWire {
    let (a_node, a_tx) =
        ids::split_interface_id(&forward.a_interface_id).unwrap_or((forward.a_interface_id.as_str(), ""));
    let (b_node, b_rx) =
        ids::split_interface_id(&forward.b_interface_id).unwrap_or((forward.b_interface_id.as_str(), ""));

    let (b_tx, a_rx) = match reverse {
        Some(rev) => {
            let (_, tx) = ids::split_interface_id(&rev.a_interface_id).unwrap_or((rev.a_interface_id.as_str(), ""));
            let (_, rx) = ids::split_interface_id(&rev.b_interface_id).unwrap_or((rev.b_interface_id.as_str(), ""));
            (tx.to_string(), rx.to_string())
        }
        None => (a_tx.to_string(), b_rx.to_string()),
    };

    BidirectionalLinkWire {
        a_node_id: a_node.to_string(),
        b_node_id: b_node.to_string(),
        a_tx_interface_id: a_tx.to_string(),
        a_rx_interface_id: Some(a_rx),
        b_tx_interface_id: b_tx,
        b_rx_interface_id: Some(b_rx.to_string()),
        medium: forward.medium.as_wire_str().to_string(),
        max_bandwidth_bps: forward.max_bandwidth_bps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_fields_take_priority_over_compound() {
        let wire = LinkWire {
            src_network_node_id: Some("n1".into()),
            src_interface_id: Some("if1".into()),
            src_compound: Some("wrong/wrong".into()),
            dst_network_node_id: Some("n2".into()),
            dst_interface_id: Some("if2".into()),
            dst_compound: None,
            medium: "WIRED".into(),
            status: None,
            is_up: None,
            max_bandwidth_bps: 1_000_000,
            available_bandwidth_bps: None,
        };
        let link = from_wire(&wire).unwrap();
        assert_eq!(link.a_interface_id, "n1/if1");
        assert_eq!(link.b_interface_id, "n2/if2");
    }

    #[test]
    fn falls_back_to_compound_when_explicit_half_missing() {
        let wire = LinkWire {
            src_network_node_id: None,
            src_interface_id: None,
            src_compound: Some("n1/if1".into()),
            dst_network_node_id: None,
            dst_interface_id: None,
            dst_compound: Some("n2/if2".into()),
            medium: "WIRED".into(),
            status: None,
            is_up: None,
            max_bandwidth_bps: 1_000_000,
            available_bandwidth_bps: None,
        };
        let link = from_wire(&wire).unwrap();
        assert_eq!(link.a_interface_id, "n1/if1");
        assert_eq!(link.b_interface_id, "n2/if2");
    }

    #[test]
    fn bidirectional_round_trips_on_node_tx_rx_medium() {
        let wire = BidirectionalLinkWire {
            a_node_id: "n1".into(),
            b_node_id: "n2".into(),
            a_tx_interface_id: "if1".into(),
            a_rx_interface_id: None,
            b_tx_interface_id: "if2".into(),
            b_rx_interface_id: None,
            medium: "WIRED".into(),
            max_bandwidth_bps: 1_000_000,
        };
        let (fwd, rev) = from_wire_bidirectional(&wire).unwrap();
        let back = to_wire_bidirectional(&fwd, Some(&rev));
        assert_eq!(back.a_node_id, wire.a_node_id);
        assert_eq!(back.b_node_id, wire.b_node_id);
        assert_eq!(back.a_tx_interface_id, wire.a_tx_interface_id);
        assert_eq!(back.b_tx_interface_id, wire.b_tx_interface_id);
        assert_eq!(back.medium, wire.medium);
    }

    #[test]
    fn bidirectional_rejects_identical_endpoints() {
        let wire = BidirectionalLinkWire {
            a_node_id: "n1".into(),
            b_node_id: "n1".into(),
            a_tx_interface_id: "if1".into(),
            a_rx_interface_id: None,
            b_tx_interface_id: "if1".into(),
            b_rx_interface_id: None,
            medium: "WIRED".into(),
            max_bandwidth_bps: 1_000_000,
        };
        assert!(from_wire_bidirectional(&wire).is_err());
    }
}
