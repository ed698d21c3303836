//! Collaborator contracts (spec §6, supplemental §4.9/§4.10): traits the
//! core depends on but never implements. Reference implementations live in
//! `constellation-sim`; the core crate only ever sees `dyn` trait objects.

use chrono::{DateTime, Utc};

use crate::domain::Platform;
use crate::error::CoreResult;

/// Advances platform motion. `UpdatePositions` is called once per tick;
/// `AddPlatform`/`RemovePlatform` mirror Scenario State's platform
/// lifecycle so the collaborator can maintain its own per-platform model.
pub trait MotionModel: Send + Sync {
    fn add_platform(&self, platform: &Platform) -> CoreResult<()>;
    fn remove_platform(&self, platform_id: &str) -> CoreResult<()>;
    fn update_positions(&self, now: DateTime<Utc>) -> CoreResult<()>;

    /// Invoked by `ClearScenario`. Default no-op for collaborators with no
    /// reset-relevant state.
    fn reset(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// Re-evaluates link up/down state from current geometry. Scenario State
/// calls this once per tick, after positions have been copied into the
/// Network KB.
pub trait ConnectivityService: Send + Sync {
    fn update_connectivity(&self) -> CoreResult<()>;

    fn reset(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// Optional counters sink (spec §6), invoked under the write lock whenever
/// platform/node/link/service-request counts change.
pub trait ScenarioMetrics: Send + Sync {
    fn set_scenario_counts(&self, platforms: usize, nodes: usize, links: usize, service_requests: usize);
}

/// Default metrics sink: discards everything. Used when the host process
/// wires no metrics backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl ScenarioMetrics for NoopMetrics {
    fn set_scenario_counts(&self, _platforms: usize, _nodes: usize, _links: usize, _service_requests: usize) {}
}

/// `tracing`-backed metrics sink: emits one debug event per count change,
/// the ambient-observability counterpart the teacher wires through its own
/// metrics module.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetrics;

impl ScenarioMetrics for TracingMetrics {
    fn set_scenario_counts(&self, platforms: usize, nodes: usize, links: usize, service_requests: usize) {
        tracing::debug!(
            platforms,
            nodes,
            links,
            service_requests,
            "scenario counts updated"
        );
    }
}
