//! Shared application state: a single [`ScenarioState`], built once at
//! startup with its motion/connectivity collaborators wired in.

use std::sync::Arc;

use constellation_core::ScenarioState;

#[derive(Clone)]
pub struct AppState {
    pub scenario: Arc<ScenarioState>,
}

impl AppState {
    pub fn new(scenario: Arc<ScenarioState>) -> Self {
        Self { scenario }
    }
}
