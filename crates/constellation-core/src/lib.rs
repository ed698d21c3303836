//! Scenario state manager and NBI service layer for a satellite/terrestrial
//! constellation simulator's control plane: platforms, network nodes,
//! interfaces, links, and service requests, kept referentially consistent
//! under concurrent mutation and a periodic simulation tick.
//!
//! This crate never spawns tasks, opens sockets, or knows about a
//! transport; `constellation-nbi` is the layer that exposes it over the
//! network, and `constellation-sim` supplies reference collaborator
//! implementations for tests and demos.

pub mod collaborators;
pub mod domain;
pub mod error;
pub mod network_kb;
pub mod physical_kb;
pub mod state;
pub mod validators;
pub mod wire;

pub use collaborators::{ConnectivityService, MotionModel, NoopMetrics, ScenarioMetrics, TracingMetrics};
pub use error::{CoreError, CoreResult, StatusClass};
pub use state::{ScenarioSnapshot, ScenarioState};
