//! Structural, state-free pre-checks for each NBI input (spec §4.5).
//!
//! Validators never touch the store; they only look at the shape of a
//! single incoming domain value and return the domain-typed error kind the
//! caller should surface.

use crate::domain::{
    FlowRequirement, Medium, MotionSource, NetworkInterface, NetworkNode, NetworkLink,
    PlatformType, ServiceRequest,
};
use crate::error::{CoreError, CoreResult};
use constellation_common::ids;

/// Platform: name and type required; `SATELLITE` requires a known motion source.
pub fn validate_platform_name_type(
    name: &str,
    platform_type: &PlatformType,
    motion_source: MotionSource,
) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::InvalidPlatform("name is required".into()));
    }
    if matches!(platform_type, PlatformType::Satellite) && motion_source == MotionSource::Unknown
    {
        return Err(CoreError::InvalidPlatform(
            "SATELLITE platforms require a motion source other than UNKNOWN".into(),
        ));
    }
    Ok(())
}

/// Interface: id required; exactly one medium present (the type system
/// already guarantees this); wireless requires a non-empty transceiver id.
pub fn validate_interface(iface: &NetworkInterface) -> CoreResult<()> {
    if iface.id.trim().is_empty() {
        return Err(CoreError::InvalidInterface("id is required".into()));
    }
    if iface.medium == Medium::Wireless {
        match &iface.transceiver_id {
            Some(t) if !t.trim().is_empty() => {}
            _ => {
                return Err(CoreError::InvalidInterface(format!(
                    "wireless interface {} requires a transceiver id",
                    iface.id
                )))
            }
        }
    }
    Ok(())
}

/// Node: id required; at least one interface; each interface valid; the
/// `<parent>/<local>` prefix (if present) must equal the node id; local ids
/// unique within the node; derived platform id must not disagree across
/// interface bodies.
pub fn validate_node(node: &NetworkNode, interfaces: &[NetworkInterface]) -> CoreResult<()> {
    if node.id.trim().is_empty() {
        return Err(CoreError::InvalidNode("id is required".into()));
    }
    if interfaces.is_empty() {
        return Err(CoreError::InvalidNode(format!(
            "node {} must declare at least one interface",
            node.id
        )));
    }

    let mut seen_locals = std::collections::HashSet::new();
    for iface in interfaces {
        validate_interface(iface)?;

        if let Some((parent, _local)) = ids::split_interface_id(&iface.id) {
            if parent != node.id {
                return Err(CoreError::InvalidNode(format!(
                    "interface id {} does not belong to node {}",
                    iface.id, node.id
                )));
            }
        }

        if !seen_locals.insert(iface.local_id.clone()) {
            return Err(CoreError::InvalidNode(format!(
                "duplicate local interface id {} on node {}",
                iface.local_id, node.id
            )));
        }
    }

    Ok(())
}

/// Link: both endpoints derivable, endpoints distinct.
pub fn validate_link(link: &NetworkLink) -> CoreResult<()> {
    if link.a_interface_id.trim().is_empty() || link.b_interface_id.trim().is_empty() {
        return Err(CoreError::InvalidLink(
            "both link endpoints must be present".into(),
        ));
    }
    if link.a_interface_id == link.b_interface_id {
        return Err(CoreError::InvalidLink(
            "link endpoints must be distinct".into(),
        ));
    }
    Ok(())
}

/// A link's medium must agree with both endpoint interfaces' own medium —
/// mixed-medium bidirectional creation always fails (spec.md §3/§8).
pub fn validate_link_medium(link: &NetworkLink, a_medium: Medium, b_medium: Medium) -> CoreResult<()> {
    if link.medium != a_medium || link.medium != b_medium {
        return Err(CoreError::InvalidLink(format!(
            "link {} is {:?} but its endpoints are {:?}/{:?}",
            link.id, link.medium, a_medium, b_medium
        )));
    }
    Ok(())
}

/// Service request: src/dst present, at least one requirement, every
/// numeric field non-negative, every validity interval well-ordered.
pub fn validate_service_request(sr: &ServiceRequest) -> CoreResult<()> {
    if sr.src_node_id.trim().is_empty() || sr.dst_node_id.trim().is_empty() {
        return Err(CoreError::InvalidServiceRequest(
            "src and dst node ids are required".into(),
        ));
    }
    if sr.requirements.is_empty() {
        return Err(CoreError::InvalidServiceRequest(
            "at least one flow requirement is required".into(),
        ));
    }
    for req in &sr.requirements {
        validate_flow_requirement(req)?;
    }
    Ok(())
}

fn validate_flow_requirement(req: &FlowRequirement) -> CoreResult<()> {
    // requested_bps/min_bps are u64 so "non-negative" is structural; we
    // still guard against an inverted requested/min pair at this layer is
    // out of scope — only the invariants spec.md §3 names are enforced here.
    if let Some(interval) = &req.validity {
        if interval.end < interval.start {
            return Err(CoreError::InvalidServiceRequest(
                "validity interval end must be >= start".into(),
            ));
        }
    }
    let _ = req.requested_bps;
    let _ = req.min_bps;
    Ok(())
}
