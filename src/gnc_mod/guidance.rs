use nalgebra::Vector2;

use crate::dynamics::state::{horizontal, DroneState, LockedTarget};
use super::math::safe_normalize;

// ---------------------------------------------------------------------------
// Guidance: raw desired heading while hunting
// ---------------------------------------------------------------------------

/// First-order intercept: aim at where the target will be `lead_time` seconds out.
/// Falls back to the current heading when the aim point coincides with the drone.
pub fn intercept_direction(
    drone: &DroneState,
    target: &LockedTarget,
    lead_time: f64,
) -> Vector2<f64> {
    let to_target = horizontal(&target.pos) - drone.ground_pos();
    let lead = horizontal(&target.vel) * lead_time;
    safe_normalize(to_target + lead).unwrap_or_else(|| drone.forward())
}
