//! Service request wire mapping (spec §4.4): endpoints are oneof-tagged,
//! the external schema has no dedicated id field (a repurposed `type`
//! string carries it instead), and mapping never overrides an id the
//! domain object already has.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{FlowRequirement, ServiceRequest, TimeInterval};
use crate::error::{CoreError, CoreResult};

/// Heterogeneous endpoint dispatch (spec §9): today only a bare node id is
/// a known variant; anything else is rejected by the validator, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ServiceEndpointWire {
    NodeId(String),
}

fn endpoint_node_id(endpoint: &ServiceEndpointWire) -> CoreResult<String> {
    match endpoint {
        ServiceEndpointWire::NodeId(id) if !id.is_empty() => Ok(id.clone()),
        ServiceEndpointWire::NodeId(_) => Err(CoreError::InvalidServiceRequest(
            "endpoint node id is required".into(),
        )),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeIntervalWire {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRequirementWire {
    pub requested_bps: u64,
    pub min_bps: u64,
    pub max_latency_secs: f64,
    pub validity: Option<TimeIntervalWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequestWire {
    /// Repurposed `type` field: carries the request id on the wire.
    #[serde(rename = "type")]
    pub type_field: String,
    pub src: ServiceEndpointWire,
    pub dst: ServiceEndpointWire,
    pub priority: i32,
    pub allow_partner: bool,
    pub disruption_tolerant: bool,
    pub requirements: Vec<FlowRequirementWire>,
    pub federation_token: Option<String>,
}

/// `existing_id` is the domain id already assigned to this request, if any
/// (e.g. on Update) — the wire's `type` field never overrides it.
pub fn from_wire(wire: &ServiceRequestWire, existing_id: Option<&str>) -> CoreResult<ServiceRequest> {
    let requirements = wire
        .requirements
        .iter()
        .map(|r| {
            Ok(FlowRequirement {
                requested_bps: r.requested_bps,
                min_bps: r.min_bps,
                max_latency: Duration::from_secs_f64(r.max_latency_secs.max(0.0)),
                validity: r.validity.as_ref().map(|v| TimeInterval {
                    start: v.start,
                    end: v.end,
                }),
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(ServiceRequest {
        id: existing_id
            .map(|s| s.to_string())
            .unwrap_or_else(|| wire.type_field.clone()),
        src_node_id: endpoint_node_id(&wire.src)?,
        dst_node_id: endpoint_node_id(&wire.dst)?,
        priority: wire.priority,
        allow_partner: wire.allow_partner,
        disruption_tolerant: wire.disruption_tolerant,
        requirements,
        cross_domain: false,
        federation_token: wire.federation_token.clone(),
        created_at: Utc::now(),
    })
}

pub fn to_wire(sr: &ServiceRequest) -> ServiceRequestWire {
    ServiceRequestWire {
        type_field: sr.id.clone(),
        src: ServiceEndpointWire::NodeId(sr.src_node_id.clone()),
        dst: ServiceEndpointWire::NodeId(sr.dst_node_id.clone()),
        priority: sr.priority,
        allow_partner: sr.allow_partner,
        disruption_tolerant: sr.disruption_tolerant,
        requirements: sr
            .requirements
            .iter()
            .map(|r| FlowRequirementWire {
                requested_bps: r.requested_bps,
                min_bps: r.min_bps,
                max_latency_secs: r.max_latency.as_secs_f64(),
                validity: r.validity.as_ref().map(|v| TimeIntervalWire {
                    start: v.start,
                    end: v.end,
                }),
            })
            .collect(),
        federation_token: sr.federation_token.clone(),
    }
}
