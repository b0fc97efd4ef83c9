pub mod state;

pub use state::{
    ControlCommand, DroneState, LockedTarget, Obstacle, SteeringConfig, TerrainSample, TickInput,
};
