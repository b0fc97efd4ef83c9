use nalgebra::Vector2;
use serde::Serialize;

use crate::dynamics::state::{ControlCommand, DroneState, SteeringConfig, TerrainSample, TickInput};
use super::avoidance::avoid;
use super::error::{ensure_finite, SteeringError};
use super::filter::OutputFilter;
use super::guidance::intercept_direction;
use super::math::{exp_blend, heading_of, safe_normalize, wrap_angle};
use super::search::SearchPattern;

// ---------------------------------------------------------------------------
// Steering pipeline: hunt/search direction -> avoidance -> actuator commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneStatus {
    Hunting,
    Searching,
}

/// Persistent per-agent state carried from one tick to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentState {
    pub search: SearchPattern,
    pub filter: OutputFilter,
}

/// Result of one tick.
#[derive(Debug, Clone)]
pub struct ControlOutput {
    pub command: ControlCommand,
    pub status: DroneStatus,
    pub search: SearchPattern,
    /// Post-avoidance desired heading, (x, z).
    pub desired_dir: Vector2<f64>,
}

/// Raw (unsmoothed) actuator commands for flying along `desired`.
pub fn actuator_command(
    drone: &DroneState,
    terrain: &TerrainSample,
    desired: Vector2<f64>,
    dt: f64,
    config: &SteeringConfig,
) -> Result<ControlCommand, SteeringError> {
    if !(drone.max_turn > 0.0 && drone.max_turn.is_finite()) {
        return Err(SteeringError::InvalidTurnRate(drone.max_turn));
    }

    // Yaw: close the heading error within one tick, limited by turn rate.
    let yaw_error = wrap_angle(heading_of(&desired) - drone.yaw);
    let yaw_rate = (yaw_error / dt.max(1e-5)).clamp(-drone.max_turn, drone.max_turn);
    let yaw = ensure_finite("yaw command", yaw_rate / drone.max_turn)?;

    // Altitude: hold target clearance over the highest nearby ground, damped by climb rate.
    let target_y = terrain.ground_ref() + drone.target_alt;
    let climb_err = target_y - drone.pos.y;
    let damping = config.vertical_damping * drone.vel.y;
    let altitude = ((climb_err - damping) * config.altitude_gain).clamp(-1.0, 1.0);

    // Forward speed along the current heading.
    let forward_speed = drone.vel.x * drone.yaw.cos() + drone.vel.z * drone.yaw.sin();
    let power = ((drone.speed - forward_speed) * config.speed_gain).clamp(-1.0, 1.0);

    Ok(ControlCommand {
        yaw,
        throttle: ensure_finite(
            "throttle",
            (altitude + power * config.power_mix).clamp(-1.0, 1.0),
        )?,
        pitch: ensure_finite("pitch", power)?,
    })
}

/// One control tick over an explicit state value. Returns the state to commit
/// alongside the output; `state` itself is never modified.
pub fn steer(
    state: &AgentState,
    input: &TickInput,
    config: &SteeringConfig,
) -> Result<(AgentState, ControlOutput), SteeringError> {
    let drone = &input.drone;
    // Time never runs backwards for the filters and sweep timer.
    let dt = ensure_finite("dt", input.dt)?.max(0.0);
    let mut next = state.clone();

    // Acquisition: a sweep still running means the target was not locked last tick.
    let newly_hunting = input.is_hunting() && next.search.initialized;

    let raw = match &input.target {
        Some(target) => {
            next.search.suspend();
            intercept_direction(drone, target, config.lead_time)
        }
        None => next.search.step(drone, dt, config),
    };

    let (status, gain) = if input.is_hunting() {
        (DroneStatus::Hunting, config.hunt_gain)
    } else {
        (DroneStatus::Searching, config.search_gain)
    };

    let prev_seek = next.search.seek_vector().unwrap_or_else(|| drone.forward());
    let blended = if newly_hunting {
        raw
    } else {
        prev_seek + (raw - prev_seek) * exp_blend(dt, gain)
    };
    let seek = safe_normalize(blended).unwrap_or(prev_seek);

    // The avoided direction is what persists and what the next tick blends from.
    let desired = avoid(drone.ground_pos(), seek, &input.obstacles, config);
    next.search.seek_dir = Some(desired.into());

    let raw_cmd = actuator_command(drone, &input.terrain, desired, dt, config)?;
    let command = next.filter.update(&raw_cmd, dt, config.output_rate);

    ensure_finite("center yaw", next.search.center_yaw)?;
    ensure_finite("sweep timer", next.search.timer)?;
    ensure_finite("seek direction", desired.norm_squared())?;
    ensure_finite("smoothed yaw", command.yaw)?;
    ensure_finite("smoothed throttle", command.throttle)?;
    ensure_finite("smoothed pitch", command.pitch)?;

    let output = ControlOutput {
        command,
        status,
        search: next.search.clone(),
        desired_dir: desired,
    };
    Ok((next, output))
}

/// Hunter/searcher controller owning one agent's persistent state.
#[derive(Debug, Clone, Default)]
pub struct HunterController {
    pub config: SteeringConfig,
    state: AgentState,
}

impl HunterController {
    pub fn new(config: SteeringConfig) -> Self {
        Self { config, state: AgentState::default() }
    }

    /// Compute one tick; the persistent state advances only if the tick succeeds.
    pub fn tick(&mut self, input: &TickInput) -> Result<ControlOutput, SteeringError> {
        let (next, output) = steer(&self.state, input, &self.config)?;
        self.state = next;
        Ok(output)
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = AgentState::default();
    }
}

impl super::Controller for HunterController {
    fn control(&mut self, input: &TickInput) -> Result<ControlOutput, SteeringError> {
        self.tick(input)
    }

    fn reset(&mut self) {
        HunterController::reset(self);
    }

    fn name(&self) -> &str {
        "HunterController"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{LockedTarget, Obstacle};
    use crate::gnc::search::SweepPhase;
    use nalgebra::Vector3;

    fn drone() -> DroneState {
        DroneState {
            pos: Vector3::new(0.0, 20.0, 0.0),
            vel: Vector3::new(8.0, 0.0, 0.0),
            yaw: 0.0,
            max_turn: 2.5,
            target_alt: 15.0,
            speed: 12.0,
        }
    }

    fn input(target: Option<LockedTarget>) -> TickInput {
        TickInput {
            drone: drone(),
            target,
            terrain: TerrainSample { height_at_drone: 2.0, ahead_max_height: 4.0 },
            obstacles: vec![],
            dt: 1.0 / 60.0,
        }
    }

    fn target_east() -> LockedTarget {
        LockedTarget { pos: Vector3::new(10.0, 0.0, 0.0), vel: Vector3::zeros() }
    }

    #[test]
    fn status_follows_target_presence() {
        let mut c = HunterController::default();
        assert_eq!(c.tick(&input(None)).unwrap().status, DroneStatus::Searching);
        assert_eq!(c.tick(&input(Some(target_east()))).unwrap().status, DroneStatus::Hunting);
        assert_eq!(c.tick(&input(None)).unwrap().status, DroneStatus::Searching);
    }

    #[test]
    fn acquisition_snaps_seek_direction() {
        let mut c = HunterController::default();
        // Sweep for a while so seekDir drifts off the target bearing.
        for _ in 0..60 {
            c.tick(&input(None)).unwrap();
        }
        let drifted = c.state().search.seek_vector().unwrap();
        assert!((drifted - Vector2::new(1.0, 0.0)).norm() > 0.1);

        let out = c.tick(&input(Some(target_east()))).unwrap();
        let seek = out.search.seek_vector().unwrap();
        assert!((seek - Vector2::new(1.0, 0.0)).norm() < 1e-9, "seek {:?}", seek);
        assert!(!out.search.initialized);
    }

    #[test]
    fn continued_hunt_is_smoothed() {
        let mut c = HunterController::default();
        c.tick(&input(None)).unwrap();
        c.tick(&input(Some(target_east()))).unwrap();
        // Target jumps to the north; the seek direction must lag behind.
        let north = LockedTarget { pos: Vector3::new(0.0, 0.0, 10.0), vel: Vector3::zeros() };
        let out = c.tick(&input(Some(north))).unwrap();
        let seek = out.search.seek_vector().unwrap();
        assert!(seek.x > 0.5 && seek.y > 0.0, "seek {:?}", seek);
    }

    #[test]
    fn first_tick_hunting_is_not_a_snap() {
        // No sweep has run yet, so there is nothing to snap out of.
        let mut c = HunterController::default();
        let north = LockedTarget { pos: Vector3::new(0.0, 0.0, 10.0), vel: Vector3::zeros() };
        let out = c.tick(&input(Some(north))).unwrap();
        let seek = out.search.seek_vector().unwrap();
        assert!(seek.x > 0.5, "seek should start from current heading: {:?}", seek);
    }

    #[test]
    fn resumed_search_reinitializes_sweep() {
        let mut c = HunterController::default();
        for _ in 0..400 {
            c.tick(&input(None)).unwrap();
        }
        c.tick(&input(Some(target_east()))).unwrap();
        let out = c.tick(&input(None)).unwrap();
        assert!(out.search.initialized);
        assert_eq!(out.search.phase, SweepPhase::Hold);
        assert_eq!(out.search.side.sign(), 1.0);
    }

    #[test]
    fn outputs_stay_bounded() {
        let mut c = HunterController::default();
        let mut i = input(None);
        for k in 0..500 {
            i.drone.yaw = k as f64 * 0.37;
            i.drone.pos = Vector3::new((k as f64 * 7.0) % 900.0 - 450.0, -50.0, 300.0);
            i.drone.vel = Vector3::new(-40.0, 30.0, 15.0);
            i.target = if k % 7 < 3 { Some(target_east()) } else { None };
            let out = c.tick(&i).unwrap();
            for v in [out.command.yaw, out.command.throttle, out.command.pitch] {
                assert!((-1.0..=1.0).contains(&v), "tick {}: {} out of range", k, v);
            }
        }
    }

    #[test]
    fn zero_dt_holds_outputs_fixed() {
        let mut c = HunterController::default();
        let mut i = input(Some(target_east()));
        for _ in 0..30 {
            c.tick(&i).unwrap();
        }
        i.dt = 0.0;
        let first = c.tick(&i).unwrap().command;
        for _ in 0..100 {
            let out = c.tick(&i).unwrap().command;
            assert_eq!(out, first);
        }
    }

    #[test]
    fn invalid_turn_rate_leaves_state_untouched() {
        let mut c = HunterController::default();
        c.tick(&input(None)).unwrap();
        let before = c.state().clone();
        let mut bad = input(None);
        bad.drone.max_turn = 0.0;
        assert_eq!(c.tick(&bad).unwrap_err(), SteeringError::InvalidTurnRate(0.0));
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn obstacle_bends_desired_direction() {
        let mut c = HunterController::default();
        let mut i = input(Some(target_east()));
        i.obstacles = vec![Obstacle { pos: Vector2::new(1.5, 0.4), radius: 1.0 }];
        let out = c.tick(&i).unwrap();
        assert!(out.desired_dir.y < -1e-3, "should veer away: {:?}", out.desired_dir);
        assert!((out.desired_dir.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn persisted_seek_includes_wall_push() {
        let config = SteeringConfig::default();
        let mut c = HunterController::default();
        let mut i = input(None);
        i.drone.pos = Vector3::new(config.arena_half_extent - 1.0, 20.0, 0.0);
        let out = c.tick(&i).unwrap();
        let seek = out.search.seek_vector().unwrap();
        assert!(seek.x < 0.0, "seek should turn back from the wall: {:?}", seek);
        assert!((seek - out.desired_dir).norm() < 1e-12);
        assert_eq!(c.state().search.seek_vector(), Some(seek));
    }

    #[test]
    fn cancelled_avoidance_persists_unavoided_seek() {
        let config = SteeringConfig::default();
        let mut c = HunterController::default();
        let mut i = input(None);
        // Facing west with the wall push exactly cancelling the heading.
        i.drone.pos = Vector3::new(-(config.arena_half_extent - 14.0), 20.0, 0.0);
        i.drone.yaw = std::f64::consts::PI;
        i.dt = 0.0;
        let out = c.tick(&i).unwrap();
        let seek = out.search.seek_vector().unwrap();
        assert!((seek - Vector2::new(-1.0, 0.0)).norm() < 1e-9, "seek {:?}", seek);
    }

    #[test]
    fn climbs_when_below_target_altitude() {
        let config = SteeringConfig::default();
        let mut d = drone();
        d.pos.y = 0.0;
        d.vel = Vector3::zeros();
        d.speed = 0.0;
        let terrain = TerrainSample { height_at_drone: 0.0, ahead_max_height: 0.0 };
        let cmd = actuator_command(&d, &terrain, Vector2::new(1.0, 0.0), 0.016, &config).unwrap();
        assert!(cmd.throttle > 0.0);
        assert_eq!(cmd.pitch, 0.0);
        assert_eq!(cmd.yaw, 0.0);
    }

    #[test]
    fn yaw_command_saturates_at_turn_limit() {
        let config = SteeringConfig::default();
        let d = drone();
        let terrain = TerrainSample::default();
        let left = actuator_command(&d, &terrain, Vector2::new(0.0, 1.0), 0.016, &config).unwrap();
        assert_eq!(left.yaw, 1.0);
        let right =
            actuator_command(&d, &terrain, Vector2::new(0.0, -1.0), 0.016, &config).unwrap();
        assert_eq!(right.yaw, -1.0);
    }
}
