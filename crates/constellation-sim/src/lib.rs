//! Deterministic, seeded reference implementations of the motion and
//! connectivity collaborators. Used only by integration tests and demo
//! binaries — the core library never depends on this crate.
//!
//! Both collaborators hold a [`Weak`] handle back into the
//! [`ScenarioState`] they serve; the owning process builds that cycle with
//! `Arc::new_cyclic` so the collaborators exist before the `Arc<ScenarioState>`
//! they reference is fully constructed.

use std::collections::HashMap;
use std::sync::{Mutex, Weak};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{RngExt as _, SeedableRng};

use constellation_core::domain::{Medium, Platform, Vec3};
use constellation_core::error::CoreResult;
use constellation_core::{ConnectivityService, MotionModel, ScenarioState};

/// Deterministic random-walk-free linear motion: each platform is assigned
/// a fixed velocity, seeded from its id, on first `add_platform`.
pub struct LinearMotionModel {
    state: Weak<ScenarioState>,
    seed: u64,
    velocities_m_per_s: Mutex<HashMap<String, Vec3>>,
    last_tick: Mutex<Option<DateTime<Utc>>>,
}

impl LinearMotionModel {
    pub fn new(state: Weak<ScenarioState>, seed: u64) -> Self {
        Self {
            state,
            seed,
            velocities_m_per_s: Mutex::new(HashMap::new()),
            last_tick: Mutex::new(None),
        }
    }

    fn seeded_velocity(&self, platform_id: &str) -> Vec3 {
        let mut rng = StdRng::seed_from_u64(self.seed ^ fnv1a(platform_id));
        let speed = 1_000.0 + rng.random::<f64>() * 6_000.0;
        Vec3::new(
            (rng.random::<f64>() - 0.5) * speed,
            (rng.random::<f64>() - 0.5) * speed,
            (rng.random::<f64>() - 0.5) * speed,
        )
    }
}

fn fnv1a(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for b in s.bytes() {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

impl MotionModel for LinearMotionModel {
    fn add_platform(&self, platform: &Platform) -> CoreResult<()> {
        let v = self.seeded_velocity(&platform.id);
        self.velocities_m_per_s
            .lock()
            .unwrap()
            .insert(platform.id.clone(), v);
        Ok(())
    }

    fn remove_platform(&self, platform_id: &str) -> CoreResult<()> {
        self.velocities_m_per_s.lock().unwrap().remove(platform_id);
        Ok(())
    }

    fn update_positions(&self, now: DateTime<Utc>) -> CoreResult<()> {
        let Some(state) = self.state.upgrade() else {
            return Ok(());
        };

        let dt_secs = {
            let mut last = self.last_tick.lock().unwrap();
            let dt = last
                .map(|prev| (now - prev).num_milliseconds() as f64 / 1000.0)
                .unwrap_or(0.0);
            *last = Some(now);
            dt.max(0.0)
        };
        if dt_secs == 0.0 {
            return Ok(());
        }

        let velocities = self.velocities_m_per_s.lock().unwrap().clone();
        for platform in state.list_platforms() {
            let Some(v) = velocities.get(&platform.id) else {
                continue;
            };
            let mut moved = platform;
            moved.ecef_m = Vec3::new(
                moved.ecef_m.x + v.x * dt_secs,
                moved.ecef_m.y + v.y * dt_secs,
                moved.ecef_m.z + v.z * dt_secs,
            );
            state.update_platform(moved)?;
        }
        Ok(())
    }

    fn reset(&self) -> CoreResult<()> {
        self.velocities_m_per_s.lock().unwrap().clear();
        *self.last_tick.lock().unwrap() = None;
        Ok(())
    }
}

/// Range-threshold connectivity: a wireless link is up when its two
/// endpoint nodes' last-known positions are within `range_km`.
pub struct RangeConnectivity {
    state: Weak<ScenarioState>,
    range_km: f64,
}

impl RangeConnectivity {
    pub fn new(state: Weak<ScenarioState>, range_km: f64) -> Self {
        Self { state, range_km }
    }
}

impl ConnectivityService for RangeConnectivity {
    fn update_connectivity(&self) -> CoreResult<()> {
        let Some(state) = self.state.upgrade() else {
            return Ok(());
        };

        for link in state.list_links() {
            if link.medium != Medium::Wireless {
                continue;
            }
            let Some((a_node, _)) = constellation_common::ids::split_interface_id(&link.a_interface_id)
            else {
                continue;
            };
            let Some((b_node, _)) = constellation_common::ids::split_interface_id(&link.b_interface_id)
            else {
                continue;
            };
            let (Some(a_pos), Some(b_pos)) = (
                state.node_ecef_position_km(a_node),
                state.node_ecef_position_km(b_node),
            ) else {
                continue;
            };

            if a_pos.distance_to(b_pos) <= self.range_km {
                state.activate_link(&link.id)?;
            } else {
                state.deactivate_link(&link.id)?;
            }
        }
        Ok(())
    }

    fn reset(&self) -> CoreResult<()> {
        Ok(())
    }
}
