//! Shared server state: one independently locked controller per agent.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::dynamics::state::SteeringConfig;
use crate::gnc::HunterController;

pub type AgentSlot = Arc<Mutex<HunterController>>;

/// Agent table keyed by agent id. Each slot's mutex guards the whole
/// compute-and-commit sequence of a tick.
pub struct AgentRegistry {
    agents: RwLock<HashMap<String, AgentSlot>>,
    config: SteeringConfig,
    max_agents: usize,
}

impl AgentRegistry {
    pub fn new(config: SteeringConfig, max_agents: usize) -> Self {
        Self {
            agents: RwLock::new(HashMap::new()),
            config,
            max_agents,
        }
    }

    /// Existing slot for `agent_id`, or a fresh one. `None` once the table is full.
    pub fn slot(&self, agent_id: &str) -> Option<AgentSlot> {
        if let Some(slot) = self.agents.read().get(agent_id) {
            return Some(Arc::clone(slot));
        }

        let mut agents = self.agents.write();
        if let Some(slot) = agents.get(agent_id) {
            return Some(Arc::clone(slot));
        }
        if agents.len() >= self.max_agents {
            return None;
        }
        let slot = Arc::new(Mutex::new(HunterController::new(self.config.clone())));
        agents.insert(agent_id.to_string(), Arc::clone(&slot));
        tracing::info!(agent_id, total = agents.len(), "registered agent");
        Some(slot)
    }

    /// Reset an agent's persistent state. Returns false if the agent is unknown.
    pub fn reset(&self, agent_id: &str) -> bool {
        let slot = self.agents.read().get(agent_id).cloned();
        match slot {
            Some(slot) => {
                slot.lock().reset();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.agents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_agents(&self) -> usize {
        self.max_agents
    }
}

/// Handle passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<AgentRegistry>,
}

impl AppState {
    pub fn new(config: SteeringConfig, max_agents: usize) -> Self {
        Self { registry: Arc::new(AgentRegistry::new(config, max_agents)) }
    }
}
