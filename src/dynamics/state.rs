use nalgebra::{Vector2, Vector3};

// ---------------------------------------------------------------------------
// Arena constants
// ---------------------------------------------------------------------------

pub const TERRAIN_SIZE: f64 = 900.0;
pub const ARENA_HALF_EXTENT: f64 = TERRAIN_SIZE * 0.48;

// ---------------------------------------------------------------------------
// Per-tick inputs
// ---------------------------------------------------------------------------

/// Kinematic snapshot of the drone for one tick.
/// Frame: y is up, the horizontal plane is (x, z), yaw is measured from +x toward +z.
#[derive(Debug, Clone)]
pub struct DroneState {
    pub pos: Vector3<f64>,   // world units
    pub vel: Vector3<f64>,   // world units / s
    pub yaw: f64,            // rad, unwrapped
    pub max_turn: f64,       // rad/s
    pub target_alt: f64,     // clearance above ground reference
    pub speed: f64,          // desired forward speed
}

impl DroneState {
    /// Unit heading in the horizontal plane, as (x, z).
    pub fn forward(&self) -> Vector2<f64> {
        Vector2::new(self.yaw.cos(), self.yaw.sin())
    }

    /// Horizontal position as (x, z).
    pub fn ground_pos(&self) -> Vector2<f64> {
        horizontal(&self.pos)
    }
}

#[derive(Debug, Clone)]
pub struct LockedTarget {
    pub pos: Vector3<f64>,
    pub vel: Vector3<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TerrainSample {
    pub height_at_drone: f64,
    pub ahead_max_height: f64,
}

impl TerrainSample {
    /// Highest ground the drone must clear, here or just ahead.
    pub fn ground_ref(&self) -> f64 {
        self.height_at_drone.max(self.ahead_max_height)
    }
}

/// Vertical cylinder; only the horizontal footprint matters.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub pos: Vector2<f64>,   // (x, z)
    pub radius: f64,
}

/// Everything one tick needs.
#[derive(Debug, Clone)]
pub struct TickInput {
    pub drone: DroneState,
    pub target: Option<LockedTarget>,
    pub terrain: TerrainSample,
    pub obstacles: Vec<Obstacle>,
    pub dt: f64,
}

impl TickInput {
    pub fn is_hunting(&self) -> bool {
        self.target.is_some()
    }
}

/// Projects a world vector onto the horizontal (x, z) plane.
pub fn horizontal(v: &Vector3<f64>) -> Vector2<f64> {
    Vector2::new(v.x, v.z)
}

// ---------------------------------------------------------------------------
// Actuator command output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlCommand {
    pub yaw: f64,        // normalized yaw rate, [-1, 1]
    pub throttle: f64,   // [-1, 1]
    pub pitch: f64,      // forward power, [-1, 1]
}

// ---------------------------------------------------------------------------
// Steering tuning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SteeringConfig {
    pub lead_time: f64,              // s, intercept prediction horizon
    pub sweep_hold: f64,             // s, dwell at one side of the sweep
    pub sweep_transit: f64,          // s, re-centering window
    pub sweep_angle: f64,            // rad, sweep amplitude
    pub recenter_rate: f64,          // 1/s, centerYaw pull toward arena origin
    pub hunt_gain: f64,              // 1/s, seekDir smoothing while hunting
    pub search_gain: f64,            // 1/s, seekDir smoothing while searching
    pub look_ahead: f64,             // avoidance probe distance along desired dir
    pub obstacle_clearance: f64,     // added to each obstacle radius
    pub arena_half_extent: f64,
    pub boundary_margin: f64,
    pub boundary_gain: f64,
    pub altitude_gain: f64,
    pub vertical_damping: f64,
    pub speed_gain: f64,
    pub power_mix: f64,              // share of forward power fed into throttle
    pub output_rate: f64,            // 1/s, final command smoothing
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            lead_time: 0.6,
            sweep_hold: 3.0,
            sweep_transit: 0.9,
            sweep_angle: 40.0_f64.to_radians(),
            recenter_rate: 0.25,
            hunt_gain: 8.0,
            search_gain: 2.2,
            look_ahead: 0.1,
            obstacle_clearance: 1.8,
            arena_half_extent: ARENA_HALF_EXTENT,
            boundary_margin: 28.0,
            boundary_gain: 2.0,
            altitude_gain: 0.2,
            vertical_damping: 0.9,
            speed_gain: 0.1,
            power_mix: 0.5,
            output_rate: 10.0,
        }
    }
}
