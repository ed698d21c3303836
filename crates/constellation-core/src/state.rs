//! Scenario State (spec §4.3): the transactional façade composing both KBs
//! and the service-request map behind a single reader/writer lock.
//!
//! Collaborator instances (`MotionModel`, `ConnectivityService`,
//! `ScenarioMetrics`) are supplied once, at construction — `CreatePlatform`
//! and `DeletePlatform` invoke them directly, and `RunSimTick` drives the
//! same stored instances rather than taking fresh ones per call. The tick
//! coordinator's only per-call inputs are `now` and an optional post-update
//! hook.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::collaborators::{ConnectivityService, MotionModel, NoopMetrics, ScenarioMetrics};
use crate::domain::{NetworkInterface, NetworkLink, NetworkNode, Platform, ServiceRequest};
use crate::error::{CoreError, CoreResult};
use crate::network_kb::NetworkKb;
use crate::physical_kb::PhysicalKb;
use crate::validators;
use constellation_common::ids;

struct ScenarioInner {
    physical: PhysicalKb,
    network: NetworkKb,
    service_requests: HashMap<String, ServiceRequest>,
    platform_counter: u64,
    service_request_counter: u64,
}

impl ScenarioInner {
    fn new() -> Self {
        Self {
            physical: PhysicalKb::new(),
            network: NetworkKb::new(),
            service_requests: HashMap::new(),
            platform_counter: 0,
            service_request_counter: 0,
        }
    }

    fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.physical.platform_count(),
            self.physical.node_count(),
            self.network.link_count(),
            self.service_requests.len(),
        )
    }
}

/// An atomic, read-only view of the whole scenario (spec §4.3 `Snapshot`).
#[derive(Debug, Clone)]
pub struct ScenarioSnapshot {
    pub platforms: Vec<Platform>,
    pub nodes: Vec<NetworkNode>,
    pub interfaces: Vec<NetworkInterface>,
    pub interfaces_by_node: HashMap<String, Vec<NetworkInterface>>,
    pub links: Vec<NetworkLink>,
    pub service_requests: Vec<ServiceRequest>,
}

pub struct ScenarioState {
    inner: RwLock<ScenarioInner>,
    motion: Arc<dyn MotionModel>,
    connectivity: Arc<dyn ConnectivityService>,
    metrics: Arc<dyn ScenarioMetrics>,
}

impl ScenarioState {
    pub fn new(motion: Arc<dyn MotionModel>, connectivity: Arc<dyn ConnectivityService>) -> Self {
        Self {
            inner: RwLock::new(ScenarioInner::new()),
            motion,
            connectivity,
            metrics: Arc::new(NoopMetrics),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn ScenarioMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    fn report_counts(&self, inner: &ScenarioInner) {
        let (platforms, nodes, links, service_requests) = inner.counts();
        self.metrics
            .set_scenario_counts(platforms, nodes, links, service_requests);
    }

    // ── Platforms ───────────────────────────────────────────────────

    pub fn create_platform(&self, mut platform: Platform) -> CoreResult<Platform> {
        validators::validate_platform_name_type(
            &platform.name,
            &platform.platform_type,
            platform.motion_source,
        )?;

        {
            let mut inner = self.inner.write().unwrap();
            if platform.id.is_empty() {
                platform.id = if !platform.name.is_empty() {
                    platform.name.clone()
                } else {
                    inner.platform_counter += 1;
                    ids::platform_id(inner.platform_counter)
                };
            }
            inner.physical.add_platform(platform.clone())?;
            self.report_counts(&inner);
        }

        if let Err(e) = self.motion.add_platform(&platform) {
            let mut inner = self.inner.write().unwrap();
            let _ = inner.physical.delete_platform(&platform.id);
            self.report_counts(&inner);
            return Err(CoreError::Internal(format!(
                "motion collaborator failed to add platform {}: {e}",
                platform.id
            )));
        }
        Ok(platform)
    }

    pub fn get_platform(&self, id: &str) -> CoreResult<Platform> {
        self.inner.read().unwrap().physical.get_platform(id).cloned()
    }

    pub fn list_platforms(&self) -> Vec<Platform> {
        self.inner
            .read()
            .unwrap()
            .physical
            .list_platforms()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn update_platform(&self, platform: Platform) -> CoreResult<Platform> {
        validators::validate_platform_name_type(
            &platform.name,
            &platform.platform_type,
            platform.motion_source,
        )?;
        let mut inner = self.inner.write().unwrap();
        inner.physical.update_platform(platform.clone())?;
        Ok(platform)
    }

    pub fn delete_platform(&self, id: &str) -> CoreResult<()> {
        {
            let mut inner = self.inner.write().unwrap();
            if !inner.physical.platform_exists(id) {
                return Err(CoreError::PlatformNotFound(id.to_string()));
            }
            if !inner.physical.nodes_referencing_platform(id).is_empty() {
                return Err(CoreError::PlatformInUse(id.to_string()));
            }
            inner.physical.delete_platform(id)?;
            self.report_counts(&inner);
        }

        if let Err(e) = self.motion.remove_platform(id) {
            tracing::warn!(platform_id = id, error = %e, "motion collaborator failed to remove platform");
            return Err(CoreError::Internal(format!(
                "motion collaborator failed to remove platform {id}: {e}"
            )));
        }
        Ok(())
    }

    // ── Nodes ───────────────────────────────────────────────────────

    pub fn create_node(
        &self,
        node: NetworkNode,
        ifaces: Vec<NetworkInterface>,
    ) -> CoreResult<(NetworkNode, Vec<NetworkInterface>)> {
        validators::validate_node(&node, &ifaces)?;

        let mut inner = self.inner.write().unwrap();
        inner.physical.add_node(node.clone())?;

        let mut added = Vec::new();
        for iface in &ifaces {
            match inner.network.add_interface(iface.clone()) {
                Ok(()) => added.push(iface.id.clone()),
                Err(e) => {
                    for id in &added {
                        let _ = inner.network.delete_interface(id);
                    }
                    let _ = inner.physical.delete_node(&node.id);
                    return Err(e);
                }
            }
        }
        self.report_counts(&inner);
        Ok((node, ifaces))
    }

    pub fn get_node(&self, id: &str) -> CoreResult<NetworkNode> {
        self.inner.read().unwrap().physical.get_node(id).cloned()
    }

    pub fn list_nodes(&self) -> Vec<NetworkNode> {
        self.inner
            .read()
            .unwrap()
            .physical
            .list_nodes()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn list_interfaces_for_node(&self, node_id: &str) -> CoreResult<Vec<NetworkInterface>> {
        let inner = self.inner.read().unwrap();
        if !inner.physical.node_exists(node_id) {
            return Err(CoreError::NodeNotFound(node_id.to_string()));
        }
        Ok(inner
            .network
            .interfaces_for_node(node_id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn update_node(
        &self,
        node: NetworkNode,
        ifaces: Vec<NetworkInterface>,
    ) -> CoreResult<(NetworkNode, Vec<NetworkInterface>)> {
        validators::validate_node(&node, &ifaces)?;

        let mut inner = self.inner.write().unwrap();
        if !inner.physical.node_exists(&node.id) {
            return Err(CoreError::NodeNotFound(node.id));
        }
        let previous_node = inner.physical.get_node(&node.id)?.clone();
        let previous_ifaces: Vec<NetworkInterface> = inner
            .network
            .interfaces_for_node(&node.id)
            .into_iter()
            .cloned()
            .collect();

        inner.physical.update_node(node.clone())?;
        if let Err(e) = inner
            .network
            .replace_interfaces_for_node(&node.id, ifaces.clone())
        {
            let _ = inner.physical.update_node(previous_node.clone());
            let _ = inner
                .network
                .replace_interfaces_for_node(&node.id, previous_ifaces);
            return Err(e);
        }
        Ok((node, ifaces))
    }

    pub fn delete_node(&self, id: &str) -> CoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        if !inner.physical.node_exists(id) {
            return Err(CoreError::NodeNotFound(id.to_string()));
        }

        let ifaces = inner.network.interfaces_for_node(id);
        let in_use_by_link = ifaces.iter().any(|i| !i.link_ids.is_empty());
        let in_use_by_sr = inner
            .service_requests
            .values()
            .any(|sr| sr.src_node_id == id || sr.dst_node_id == id);
        if in_use_by_link || in_use_by_sr {
            return Err(CoreError::NodeInUse(id.to_string()));
        }

        let iface_ids: Vec<String> = ifaces.into_iter().map(|i| i.id.clone()).collect();
        for iface_id in iface_ids {
            let _ = inner.network.delete_interface(&iface_id);
        }
        inner.physical.delete_node(id)?;
        self.report_counts(&inner);
        Ok(())
    }

    // ── Links ───────────────────────────────────────────────────────

    /// Batch insert: all links installed, or none (spec §4.3/§5).
    pub fn create_links(&self, links: Vec<NetworkLink>) -> CoreResult<Vec<NetworkLink>> {
        let mut inner = self.inner.write().unwrap();
        let mut added = Vec::new();

        for link in &links {
            if let Err(e) = validators::validate_link(link) {
                for id in &added {
                    let _ = inner.network.delete_network_link(id);
                }
                return Err(e);
            }

            let parents = match (
                inner.network.get_network_interface(&link.a_interface_id),
                inner.network.get_network_interface(&link.b_interface_id),
            ) {
                (Ok(a), Ok(b)) => {
                    if let Err(e) = validators::validate_link_medium(link, a.medium, b.medium) {
                        for id in &added {
                            let _ = inner.network.delete_network_link(id);
                        }
                        return Err(e);
                    }
                    Some((a.parent_node_id.clone(), b.parent_node_id.clone()))
                }
                (Err(e), _) | (_, Err(e)) => {
                    for id in &added {
                        let _ = inner.network.delete_network_link(id);
                    }
                    return Err(e);
                }
            };
            if let Some((a_parent, b_parent)) = parents {
                if !inner.physical.node_exists(&a_parent) {
                    for id in &added {
                        let _ = inner.network.delete_network_link(id);
                    }
                    return Err(CoreError::NodeNotFound(a_parent));
                }
                if !inner.physical.node_exists(&b_parent) {
                    for id in &added {
                        let _ = inner.network.delete_network_link(id);
                    }
                    return Err(CoreError::NodeNotFound(b_parent));
                }
            }

            match inner.network.add_network_link(link.clone()) {
                Ok(()) => added.push(link.id.clone()),
                Err(e) => {
                    for id in &added {
                        let _ = inner.network.delete_network_link(id);
                    }
                    return Err(e);
                }
            }
        }

        self.report_counts(&inner);
        Ok(links)
    }

    pub fn get_link(&self, id: &str) -> CoreResult<NetworkLink> {
        self.inner
            .read()
            .unwrap()
            .network
            .get_network_link(id)
            .cloned()
    }

    pub fn list_links(&self) -> Vec<NetworkLink> {
        self.inner
            .read()
            .unwrap()
            .network
            .get_all_network_links()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn update_link(&self, link: NetworkLink) -> CoreResult<NetworkLink> {
        let mut inner = self.inner.write().unwrap();
        inner.network.update_network_link(link.clone())?;
        Ok(link)
    }

    pub fn delete_link(&self, id: &str) -> CoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner.network.delete_network_link(id)?;
        self.report_counts(&inner);
        Ok(())
    }

    pub fn activate_link(&self, id: &str) -> CoreResult<NetworkLink> {
        let mut inner = self.inner.write().unwrap();
        let link = inner.network.get_network_link_mut(id)?;
        link.activate();
        Ok(link.clone())
    }

    pub fn deactivate_link(&self, id: &str) -> CoreResult<NetworkLink> {
        let mut inner = self.inner.write().unwrap();
        let link = inner.network.get_network_link_mut(id)?;
        link.deactivate();
        Ok(link.clone())
    }

    // ── Service requests ────────────────────────────────────────────

    pub fn create_service_request(&self, mut sr: ServiceRequest) -> CoreResult<ServiceRequest> {
        validators::validate_service_request(&sr)?;

        let mut inner = self.inner.write().unwrap();
        if sr.id.is_empty() {
            inner.service_request_counter += 1;
            sr.id = ids::service_request_id(inner.service_request_counter);
        }
        if inner.service_requests.contains_key(&sr.id) {
            return Err(CoreError::ServiceRequestExists(sr.id));
        }

        self.resolve_scheduling_domain(&inner, &mut sr)?;

        inner.service_requests.insert(sr.id.clone(), sr.clone());
        self.report_counts(&inner);
        Ok(sr)
    }

    pub fn get_service_request(&self, id: &str) -> CoreResult<ServiceRequest> {
        self.inner
            .read()
            .unwrap()
            .service_requests
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::ServiceRequestNotFound(id.to_string()))
    }

    pub fn list_service_requests(&self) -> Vec<ServiceRequest> {
        self.inner
            .read()
            .unwrap()
            .service_requests
            .values()
            .cloned()
            .collect()
    }

    pub fn update_service_request(&self, mut sr: ServiceRequest) -> CoreResult<ServiceRequest> {
        validators::validate_service_request(&sr)?;

        let mut inner = self.inner.write().unwrap();
        if !inner.service_requests.contains_key(&sr.id) {
            return Err(CoreError::ServiceRequestNotFound(sr.id));
        }
        self.resolve_scheduling_domain(&inner, &mut sr)?;
        inner.service_requests.insert(sr.id.clone(), sr.clone());
        Ok(sr)
    }

    pub fn delete_service_request(&self, id: &str) -> CoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner
            .service_requests
            .remove(id)
            .ok_or_else(|| CoreError::ServiceRequestNotFound(id.to_string()))?;
        self.report_counts(&inner);
        Ok(())
    }

    /// A node's scheduling domain is its `country_code`; nodes with no code
    /// are treated as domain-less and never force cross-domain handling.
    /// Cross-domain pairs must carry a federation token (spec §4.3 —
    /// "must carry a federation token"), or the request is rejected with
    /// `domain_invalid`.
    fn resolve_scheduling_domain(
        &self,
        inner: &ScenarioInner,
        sr: &mut ServiceRequest,
    ) -> CoreResult<()> {
        let src = inner
            .physical
            .get_node(&sr.src_node_id)
            .map_err(|_| CoreError::NodeNotFound(sr.src_node_id.clone()))?;
        let dst = inner
            .physical
            .get_node(&sr.dst_node_id)
            .map_err(|_| CoreError::NodeNotFound(sr.dst_node_id.clone()))?;

        let cross_domain = match (&src.country_code, &dst.country_code) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        };
        if cross_domain && sr.federation_token.as_deref().unwrap_or("").is_empty() {
            return Err(CoreError::DomainInvalid(format!(
                "service request {} crosses scheduling domains and requires a federation token",
                sr.id
            )));
        }
        sr.cross_domain = cross_domain;
        Ok(())
    }

    /// A node's last-known ECEF position in km, as populated by the most
    /// recent tick's motion copy-in (spec §4.3 `RunSimTick` step b).
    pub fn node_ecef_position_km(&self, node_id: &str) -> Option<crate::domain::Vec3> {
        self.inner
            .read()
            .unwrap()
            .network
            .get_node_ecef_position(node_id)
            .copied()
    }

    // ── Snapshot / Clear / Tick ─────────────────────────────────────

    pub fn snapshot(&self) -> ScenarioSnapshot {
        let inner = self.inner.read().unwrap();

        let platforms: Vec<Platform> = inner.physical.list_platforms().into_iter().cloned().collect();
        let nodes: Vec<NetworkNode> = inner.physical.list_nodes().into_iter().cloned().collect();
        let interfaces: Vec<NetworkInterface> = inner
            .network
            .list_all_interfaces()
            .into_iter()
            .cloned()
            .collect();
        let links: Vec<NetworkLink> = inner
            .network
            .get_all_network_links()
            .into_iter()
            .cloned()
            .collect();
        let service_requests: Vec<ServiceRequest> = inner.service_requests.values().cloned().collect();

        let mut interfaces_by_node: HashMap<String, Vec<NetworkInterface>> = HashMap::new();
        for iface in &interfaces {
            interfaces_by_node
                .entry(iface.parent_node_id.clone())
                .or_default()
                .push(iface.clone());
        }

        ScenarioSnapshot {
            platforms,
            nodes,
            interfaces,
            interfaces_by_node,
            links,
            service_requests,
        }
    }

    pub fn clear_scenario(&self) -> CoreResult<()> {
        {
            let mut inner = self.inner.write().unwrap();
            inner.physical.clear();
            inner.network.clear();
            inner.service_requests.clear();
            inner.platform_counter = 0;
            inner.service_request_counter = 0;
            self.report_counts(&inner);
        }
        self.motion.reset()?;
        self.connectivity.reset()?;
        Ok(())
    }

    /// One simulation tick (spec §4.3/§4.8): advance motion, copy ECEF
    /// positions (m → km) into the Network KB per node, run the caller's
    /// post-update hook, then re-evaluate connectivity. `post_update` runs
    /// while the write lock is held, matching the ordering in spec §4.3's
    /// `RunSimTick` row.
    pub fn run_sim_tick<F: FnOnce()>(&self, now: DateTime<Utc>, post_update: F) -> CoreResult<()> {
        self.motion.update_positions(now)?;

        {
            let mut inner = self.inner.write().unwrap();
            let node_platforms: Vec<(String, String)> = inner
                .physical
                .list_nodes()
                .into_iter()
                .filter_map(|n| {
                    n.platform_id
                        .as_ref()
                        .filter(|p| !p.is_empty())
                        .map(|p| (n.id.clone(), p.clone()))
                })
                .collect();

            for (node_id, platform_id) in node_platforms {
                if let Ok(platform) = inner.physical.get_platform(&platform_id) {
                    let km = platform.ecef_m.m_to_km();
                    inner.network.set_node_ecef_position(&node_id, km);
                }
            }

            post_update();
        }

        self.connectivity.update_connectivity()?;
        Ok(())
    }
}
