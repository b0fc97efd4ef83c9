use serde::Serialize;

use crate::dynamics::state::ControlCommand;
use super::math::{exp_blend, lerp, lerp_angle};

// ---------------------------------------------------------------------------
// Output filter: first-order smoothing of the three actuator channels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutputFilter {
    pub last_yaw: f64,
    pub last_throttle: f64,
    pub last_pitch: f64,
}

impl OutputFilter {
    /// Blend the raw command into the filter and return the smoothed command.
    pub fn update(&mut self, raw: &ControlCommand, dt: f64, rate: f64) -> ControlCommand {
        let t = exp_blend(dt, rate);
        self.last_yaw = lerp_angle(self.last_yaw, raw.yaw, t);
        self.last_throttle = lerp(self.last_throttle, raw.throttle, t);
        self.last_pitch = lerp(self.last_pitch, raw.pitch, t);
        self.output()
    }

    pub fn output(&self) -> ControlCommand {
        ControlCommand {
            yaw: self.last_yaw,
            throttle: self.last_throttle,
            pitch: self.last_pitch,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
