pub mod config;
pub mod dynamics;
mod gnc_mod;
pub mod io;
pub mod server;
pub mod sim;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

pub mod types {
    pub use crate::dynamics::state::{
        ControlCommand, DroneState, LockedTarget, Obstacle, SteeringConfig, TerrainSample,
        TickInput, ARENA_HALF_EXTENT,
    };
    pub use crate::gnc::{AgentState, ControlOutput, DroneStatus, SearchPattern};
}

/// Synchronous control boundary: run one tick of a decoded request on `controller`.
pub fn compute_controls(
    controller: &mut gnc::HunterController,
    request: &io::json::ControlRequest,
) -> Result<io::json::ControlResponse, gnc::SteeringError> {
    controller.tick(&request.to_tick_input()).map(Into::into)
}
