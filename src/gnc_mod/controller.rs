use crate::dynamics::state::TickInput;
use super::error::SteeringError;
use super::steering::ControlOutput;

/// Trait for per-tick steering controllers.
///
/// Implement this to plug a different steering policy into the server or the
/// replay runner. Implementations own their persistent state.
pub trait Controller {
    /// Compute actuator commands for one tick.
    fn control(&mut self, input: &TickInput) -> Result<ControlOutput, SteeringError>;

    /// Drop all persistent state (search pattern, output filters).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
