use nalgebra::Vector2;
use serde::Serialize;

use crate::dynamics::state::{DroneState, SteeringConfig};
use super::math::{exp_blend, heading_vector, lerp_angle, wrap_angle};

// ---------------------------------------------------------------------------
// Search sweep: hold at one side, transit to the other while re-centering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepPhase {
    Hold,
    Transit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepSide {
    Left,
    Right,
}

impl SweepSide {
    pub fn sign(self) -> f64 {
        match self {
            SweepSide::Left => -1.0,
            SweepSide::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SweepSide::Left => SweepSide::Right,
            SweepSide::Right => SweepSide::Left,
        }
    }
}

impl Serialize for SweepSide {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.sign() as i8)
    }
}

/// Unit direction in the horizontal plane, serialized as `{x, z}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeekDir {
    pub x: f64,
    pub z: f64,
}

impl From<Vector2<f64>> for SeekDir {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, z: v.y }
    }
}

impl From<SeekDir> for Vector2<f64> {
    fn from(d: SeekDir) -> Self {
        Vector2::new(d.x, d.z)
    }
}

/// Persistent search-pattern state. Also carries the smoothed seek direction,
/// which is shared with hunting mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPattern {
    #[serde(rename = "inited")]
    pub initialized: bool,
    pub center_yaw: f64,
    pub side: SweepSide,
    pub timer: f64,
    pub phase: SweepPhase,
    pub seek_dir: Option<SeekDir>,
}

impl Default for SearchPattern {
    fn default() -> Self {
        Self {
            initialized: false,
            center_yaw: 0.0,
            side: SweepSide::Right,
            timer: 0.0,
            phase: SweepPhase::Hold,
            seek_dir: None,
        }
    }
}

impl SearchPattern {
    /// Start a fresh sweep centered on the current heading.
    fn begin(&mut self, yaw: f64, config: &SteeringConfig) {
        self.initialized = true;
        self.center_yaw = wrap_angle(yaw);
        self.side = SweepSide::Right;
        self.timer = config.sweep_hold;
        self.phase = SweepPhase::Hold;
    }

    /// Suspend the sweep; the next searching tick starts a new one.
    pub fn suspend(&mut self) {
        self.initialized = false;
    }

    /// Advance the sweep by `dt` and return the raw desired direction.
    pub fn step(&mut self, drone: &DroneState, dt: f64, config: &SteeringConfig) -> Vector2<f64> {
        if !self.initialized {
            self.begin(drone.yaw, config);
        }

        if self.phase == SweepPhase::Transit {
            let home = (-drone.pos.z).atan2(-drone.pos.x);
            self.center_yaw = wrap_angle(lerp_angle(
                self.center_yaw,
                home,
                exp_blend(dt, config.recenter_rate),
            ));
        }

        self.timer -= dt;
        if self.timer <= 0.0 {
            match self.phase {
                SweepPhase::Hold => {
                    self.side = self.side.flipped();
                    self.phase = SweepPhase::Transit;
                    self.timer = config.sweep_transit;
                }
                SweepPhase::Transit => {
                    self.phase = SweepPhase::Hold;
                    self.timer = config.sweep_hold;
                }
            }
        }

        heading_vector(self.sweep_heading(config))
    }

    /// Heading currently swept toward, in (-pi, pi].
    pub fn sweep_heading(&self, config: &SteeringConfig) -> f64 {
        wrap_angle(self.center_yaw + self.side.sign() * config.sweep_angle)
    }

    pub fn seek_vector(&self) -> Option<Vector2<f64>> {
        self.seek_dir.map(Vector2::from)
    }
}
