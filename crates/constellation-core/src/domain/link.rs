use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interface::Medium;

/// Directional link status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    Unknown,
    Potential,
    Active,
}

impl LinkStatus {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            LinkStatus::Unknown => "UNKNOWN",
            LinkStatus::Potential => "POTENTIAL",
            LinkStatus::Active => "ACTIVE",
        }
    }

    pub fn from_wire_str(s: &str) -> Option<LinkStatus> {
        match s {
            "UNKNOWN" => Some(LinkStatus::Unknown),
            "POTENTIAL" => Some(LinkStatus::Potential),
            "ACTIVE" => Some(LinkStatus::Active),
            _ => None,
        }
    }
}

/// A directional network link, stored internally. Two opposing directional
/// links with matching (swapped) endpoints form a bidirectional pair on the
/// wire side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkLink {
    pub id: String,
    pub a_interface_id: String,
    pub b_interface_id: String,
    pub medium: Medium,
    pub status: LinkStatus,
    pub is_up: bool,
    pub is_static: bool,
    pub max_bandwidth_bps: u64,
    pub available_bandwidth_bps: u64,
    pub created_at: DateTime<Utc>,
}

impl NetworkLink {
    /// A freshly created wired link is always up (spec §3).
    pub fn new_wired(
        id: String,
        a_interface_id: String,
        b_interface_id: String,
        max_bandwidth_bps: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            a_interface_id,
            b_interface_id,
            medium: Medium::Wired,
            status: LinkStatus::Active,
            is_up: true,
            is_static: true,
            max_bandwidth_bps,
            available_bandwidth_bps: max_bandwidth_bps,
            created_at,
        }
    }

    /// A freshly created wireless link is unevaluated until the connectivity
    /// collaborator decides (spec §3).
    pub fn new_wireless(
        id: String,
        a_interface_id: String,
        b_interface_id: String,
        max_bandwidth_bps: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            a_interface_id,
            b_interface_id,
            medium: Medium::Wireless,
            status: LinkStatus::Unknown,
            is_up: false,
            is_static: false,
            max_bandwidth_bps,
            available_bandwidth_bps: max_bandwidth_bps,
            created_at,
        }
    }

    /// Re-activating an active link is a no-op (spec §5 idempotence).
    pub fn activate(&mut self) {
        self.status = LinkStatus::Active;
        self.is_up = true;
    }

    /// Re-deactivating an inactive link is a no-op.
    pub fn deactivate(&mut self) {
        self.status = LinkStatus::Potential;
        self.is_up = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_is_idempotent() {
        let mut link = NetworkLink::new_wireless(
            "l1".into(),
            "n1/if1".into(),
            "n2/if2".into(),
            1_000_000,
            Utc::now(),
        );
        link.activate();
        link.activate();
        assert!(link.is_up);
        assert_eq!(link.status, LinkStatus::Active);
    }
}
