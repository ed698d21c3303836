//! Background tick coordinator (spec §4.8): not part of the core library —
//! invokes `ScenarioState::run_sim_tick` at a fixed cadence, exactly the
//! shape of the teacher's spawned background tasks in
//! `strata-control/src/ws_agent.rs`.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use constellation_core::ScenarioState;

pub fn spawn(scenario: Arc<ScenarioState>, interval_ms: u64) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let now = Utc::now();
            if let Err(e) = scenario.run_sim_tick(now, || {}) {
                tracing::warn!(error = %e, "simulation tick failed");
            }
        }
    })
}
