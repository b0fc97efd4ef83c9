use nalgebra::Vector2;

use crate::dynamics::state::{Obstacle, SteeringConfig};
use super::math::safe_normalize;

// ---------------------------------------------------------------------------
// Avoidance field: obstacle repulsion + arena boundary push
// ---------------------------------------------------------------------------

/// Repulsion from obstacles whose inflated footprint contains the look-ahead point.
/// Each contribution points from the obstacle center outward and fades linearly to
/// zero at the inflated radius.
pub fn obstacle_push(
    ground_pos: Vector2<f64>,
    desired: Vector2<f64>,
    obstacles: &[Obstacle],
    config: &SteeringConfig,
) -> Vector2<f64> {
    let ahead = ground_pos + desired * config.look_ahead;
    let mut push = Vector2::zeros();

    for o in obstacles {
        let away = ahead - o.pos;
        let d2 = away.norm_squared();
        let r = o.radius + config.obstacle_clearance;
        if d2 >= r * r {
            continue;
        }
        let dist = d2.sqrt();
        if dist > 1e-6 {
            push += (away / dist) * (1.0 - dist / r);
        }
    }

    push
}

/// Inward push near the square arena's edges, per axis.
pub fn boundary_push(ground_pos: Vector2<f64>, config: &SteeringConfig) -> Vector2<f64> {
    let margin = config.boundary_margin;
    let axis = |p: f64| {
        let dist = config.arena_half_extent - p.abs();
        if dist < margin {
            1.0_f64.copysign(p) * (1.0 - dist / margin)
        } else {
            0.0
        }
    };
    -Vector2::new(axis(ground_pos.x), axis(ground_pos.y)) * config.boundary_gain
}

/// Total additive avoidance vector for a desired direction.
pub fn steer_avoid(
    ground_pos: Vector2<f64>,
    desired: Vector2<f64>,
    obstacles: &[Obstacle],
    config: &SteeringConfig,
) -> Vector2<f64> {
    obstacle_push(ground_pos, desired, obstacles, config) + boundary_push(ground_pos, config)
}

/// Adds the avoidance field to `desired` and renormalizes. A field that exactly
/// cancels the desired direction leaves `desired` unchanged.
pub fn avoid(
    ground_pos: Vector2<f64>,
    desired: Vector2<f64>,
    obstacles: &[Obstacle],
    config: &SteeringConfig,
) -> Vector2<f64> {
    let push = steer_avoid(ground_pos, desired, obstacles, config);
    safe_normalize(desired + push).unwrap_or(desired)
}
