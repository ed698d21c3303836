//! Network KB (spec §4.2): interfaces, directional links, transceiver
//! models, and per-node ECEF positions (km). No locking of its own — the
//! owning Scenario State's single lock covers it.

use std::collections::HashMap;

use crate::domain::{NetworkInterface, NetworkLink, TransceiverModel, Vec3};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Default)]
pub struct NetworkKb {
    interfaces: HashMap<String, NetworkInterface>,
    links: HashMap<String, NetworkLink>,
    transceivers: HashMap<String, TransceiverModel>,
    /// ECEF position in km, keyed by node id.
    positions: HashMap<String, Vec3>,
}

impl NetworkKb {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Interfaces ──────────────────────────────────────────────────

    pub fn add_interface(&mut self, iface: NetworkInterface) -> CoreResult<()> {
        if self.interfaces.contains_key(&iface.id) {
            return Err(CoreError::InterfaceExists(iface.id));
        }
        if let Some(transceiver_id) = &iface.transceiver_id {
            if !transceiver_id.is_empty() && !self.transceivers.contains_key(transceiver_id) {
                return Err(CoreError::TransceiverNotFound(transceiver_id.clone()));
            }
        }
        self.interfaces.insert(iface.id.clone(), iface);
        Ok(())
    }

    pub fn delete_interface(&mut self, id: &str) -> CoreResult<NetworkInterface> {
        self.interfaces
            .remove(id)
            .ok_or_else(|| CoreError::InterfaceNotFound(id.to_string()))
    }

    pub fn get_network_interface(&self, id: &str) -> CoreResult<&NetworkInterface> {
        self.interfaces
            .get(id)
            .ok_or_else(|| CoreError::InterfaceNotFound(id.to_string()))
    }

    pub fn interface_exists(&self, id: &str) -> bool {
        self.interfaces.contains_key(id)
    }

    pub fn interfaces_for_node(&self, node_id: &str) -> Vec<&NetworkInterface> {
        self.interfaces
            .values()
            .filter(|i| i.parent_node_id == node_id)
            .collect()
    }

    pub fn list_all_interfaces(&self) -> Vec<&NetworkInterface> {
        self.interfaces.values().collect()
    }

    /// Diff `desired` against the interfaces currently parented on
    /// `node_id`: remove absent, add new, update changed. Link reverse
    /// indices are left untouched here — callers that remove an interface
    /// still carrying link references are responsible for rejecting that
    /// case before calling this (Scenario State's node-update path does so
    /// via the same referential-integrity scan as node delete).
    pub fn replace_interfaces_for_node(
        &mut self,
        node_id: &str,
        desired: Vec<NetworkInterface>,
    ) -> CoreResult<()> {
        for iface in &desired {
            if let Some(transceiver_id) = &iface.transceiver_id {
                if !transceiver_id.is_empty() && !self.transceivers.contains_key(transceiver_id) {
                    return Err(CoreError::TransceiverNotFound(transceiver_id.clone()));
                }
            }
        }

        let desired_ids: std::collections::HashSet<&str> =
            desired.iter().map(|i| i.id.as_str()).collect();
        let stale: Vec<String> = self
            .interfaces
            .values()
            .filter(|i| i.parent_node_id == node_id && !desired_ids.contains(i.id.as_str()))
            .map(|i| i.id.clone())
            .collect();
        for id in stale {
            self.interfaces.remove(&id);
        }

        for mut iface in desired {
            // Preserve the reverse link index of an interface that survives
            // the replace under the same id.
            if let Some(existing) = self.interfaces.get(&iface.id) {
                iface.link_ids = existing.link_ids.clone();
            }
            self.interfaces.insert(iface.id.clone(), iface);
        }
        Ok(())
    }

    // ── Links ───────────────────────────────────────────────────────

    pub fn add_network_link(&mut self, link: NetworkLink) -> CoreResult<()> {
        if self.links.contains_key(&link.id) {
            return Err(CoreError::LinkExists(link.id));
        }
        if !self.interfaces.contains_key(&link.a_interface_id) {
            return Err(CoreError::InterfaceMiss(link.a_interface_id));
        }
        if !self.interfaces.contains_key(&link.b_interface_id) {
            return Err(CoreError::InterfaceMiss(link.b_interface_id));
        }

        if let Some(a) = self.interfaces.get_mut(&link.a_interface_id) {
            a.link_ids.push(link.id.clone());
        }
        if let Some(b) = self.interfaces.get_mut(&link.b_interface_id) {
            b.link_ids.push(link.id.clone());
        }
        self.links.insert(link.id.clone(), link);
        Ok(())
    }

    pub fn update_network_link(&mut self, link: NetworkLink) -> CoreResult<()> {
        if !self.links.contains_key(&link.id) {
            return Err(CoreError::LinkNotFound(link.id));
        }
        self.links.insert(link.id.clone(), link);
        Ok(())
    }

    pub fn delete_network_link(&mut self, id: &str) -> CoreResult<NetworkLink> {
        let link = self
            .links
            .remove(id)
            .ok_or_else(|| CoreError::LinkNotFound(id.to_string()))?;

        if let Some(a) = self.interfaces.get_mut(&link.a_interface_id) {
            a.link_ids.retain(|l| l != id);
        }
        if let Some(b) = self.interfaces.get_mut(&link.b_interface_id) {
            b.link_ids.retain(|l| l != id);
        }
        Ok(link)
    }

    pub fn get_network_link(&self, id: &str) -> CoreResult<&NetworkLink> {
        self.links
            .get(id)
            .ok_or_else(|| CoreError::LinkNotFound(id.to_string()))
    }

    pub fn get_network_link_mut(&mut self, id: &str) -> CoreResult<&mut NetworkLink> {
        self.links
            .get_mut(id)
            .ok_or_else(|| CoreError::LinkNotFound(id.to_string()))
    }

    pub fn get_all_network_links(&self) -> Vec<&NetworkLink> {
        self.links.values().collect()
    }

    pub fn get_links_for_interface(&self, interface_id: &str) -> Vec<&NetworkLink> {
        self.links
            .values()
            .filter(|l| l.a_interface_id == interface_id || l.b_interface_id == interface_id)
            .collect()
    }

    // ── Transceiver models ──────────────────────────────────────────

    pub fn add_transceiver_model(&mut self, model: TransceiverModel) {
        self.transceivers.insert(model.id.clone(), model);
    }

    pub fn get_transceiver_model(&self, id: &str) -> CoreResult<&TransceiverModel> {
        self.transceivers
            .get(id)
            .ok_or_else(|| CoreError::TransceiverNotFound(id.to_string()))
    }

    // ── Positions ───────────────────────────────────────────────────

    /// `position` is ECEF in km (spec §4.2/§4.3 RunSimTick copies meters→km).
    pub fn set_node_ecef_position(&mut self, node_id: &str, position: Vec3) {
        self.positions.insert(node_id.to_string(), position);
    }

    pub fn get_node_ecef_position(&self, node_id: &str) -> Option<&Vec3> {
        self.positions.get(node_id)
    }

    pub fn clear(&mut self) {
        self.interfaces.clear();
        self.links.clear();
        self.transceivers.clear();
        self.positions.clear();
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
