//! Physical KB (spec §4.1): platforms and nodes, plus the platform↔node
//! reference check. No locking of its own — the owning Scenario State's
//! single lock covers it.

use std::collections::HashMap;

use crate::domain::{NetworkNode, Platform};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Default)]
pub struct PhysicalKb {
    platforms: HashMap<String, Platform>,
    nodes: HashMap<String, NetworkNode>,
}

impl PhysicalKb {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Platforms ───────────────────────────────────────────────────

    pub fn add_platform(&mut self, platform: Platform) -> CoreResult<()> {
        if self.platforms.contains_key(&platform.id) {
            return Err(CoreError::PlatformExists(platform.id));
        }
        self.platforms.insert(platform.id.clone(), platform);
        Ok(())
    }

    pub fn get_platform(&self, id: &str) -> CoreResult<&Platform> {
        self.platforms
            .get(id)
            .ok_or_else(|| CoreError::PlatformNotFound(id.to_string()))
    }

    pub fn platform_exists(&self, id: &str) -> bool {
        self.platforms.contains_key(id)
    }

    pub fn update_platform(&mut self, platform: Platform) -> CoreResult<()> {
        if !self.platforms.contains_key(&platform.id) {
            return Err(CoreError::PlatformNotFound(platform.id));
        }
        self.platforms.insert(platform.id.clone(), platform);
        Ok(())
    }

    pub fn delete_platform(&mut self, id: &str) -> CoreResult<Platform> {
        self.platforms
            .remove(id)
            .ok_or_else(|| CoreError::PlatformNotFound(id.to_string()))
    }

    pub fn list_platforms(&self) -> Vec<&Platform> {
        self.platforms.values().collect()
    }

    /// Any node whose `platform_id` matches, used by `DeletePlatform`'s
    /// referential-integrity scan (spec §4.3.2).
    pub fn nodes_referencing_platform(&self, platform_id: &str) -> Vec<&NetworkNode> {
        self.nodes
            .values()
            .filter(|n| n.platform_id.as_deref() == Some(platform_id))
            .collect()
    }

    // ── Nodes ───────────────────────────────────────────────────────

    pub fn add_node(&mut self, node: NetworkNode) -> CoreResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(CoreError::NodeExists(node.id));
        }
        if let Some(platform_id) = &node.platform_id {
            if !platform_id.is_empty() && !self.platforms.contains_key(platform_id) {
                return Err(CoreError::PlatformNotFound(platform_id.clone()));
            }
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    pub fn get_node(&self, id: &str) -> CoreResult<&NetworkNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| CoreError::NodeNotFound(id.to_string()))
    }

    pub fn node_exists(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn update_node(&mut self, node: NetworkNode) -> CoreResult<()> {
        if !self.nodes.contains_key(&node.id) {
            return Err(CoreError::NodeNotFound(node.id));
        }
        if let Some(platform_id) = &node.platform_id {
            if !platform_id.is_empty() && !self.platforms.contains_key(platform_id) {
                return Err(CoreError::PlatformNotFound(platform_id.clone()));
            }
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    pub fn delete_node(&mut self, id: &str) -> CoreResult<NetworkNode> {
        self.nodes
            .remove(id)
            .ok_or_else(|| CoreError::NodeNotFound(id.to_string()))
    }

    pub fn list_nodes(&self) -> Vec<&NetworkNode> {
        self.nodes.values().collect()
    }

    pub fn clear(&mut self) {
        self.platforms.clear();
        self.nodes.clear();
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
