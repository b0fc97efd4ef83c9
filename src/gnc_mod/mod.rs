pub mod avoidance;
pub mod controller;
pub mod error;
pub mod filter;
pub mod guidance;
pub mod math;
pub mod search;
pub mod steering;

pub use controller::Controller;
pub use error::SteeringError;
pub use filter::OutputFilter;
pub use guidance::intercept_direction;
pub use math::{lerp_angle, safe_normalize, wrap_angle};
pub use search::{SearchPattern, SeekDir, SweepPhase, SweepSide};
pub use steering::{steer, AgentState, ControlOutput, DroneStatus, HunterController};
