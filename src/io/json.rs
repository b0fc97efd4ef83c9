//! JSON wire format for the control endpoint.
//!
//! Decoding happens in two passes: the body is first read as a loose JSON value
//! so an empty or unparseable body can be told apart from one that is merely
//! missing required fields, then the value is decoded into the typed schema.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dynamics::state::{
    ControlCommand, DroneState, LockedTarget, Obstacle, TerrainSample, TickInput,
};
use crate::gnc::{ControlOutput, DroneStatus, SearchPattern};

pub const DEFAULT_AGENT_ID: &str = "default";

const REQUIRED_FIELDS: [&str; 3] = ["drone", "terrain", "dt"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("No data received")]
    Malformed,
    #[error("Incomplete data provided")]
    Incomplete,
    /// Required fields are present but their contents do not decode.
    #[error("request does not match schema: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Request schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vec3> for Vector3<f64> {
    fn from(v: Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct GroundPoint {
    pub x: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneDto {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f64,
    pub max_turn: f64,
    pub target_alt: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetDto {
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct TerrainDto {
    pub height_at_drone: f64,
    pub ahead_max_height: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ObstacleDto {
    pub pos: GroundPoint,
    pub radius: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRequest {
    #[serde(default)]
    pub agent_id: Option<String>,
    pub drone: DroneDto,
    #[serde(default)]
    pub locked_target: Option<TargetDto>,
    pub terrain: TerrainDto,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDto>,
    pub dt: f64,
}

impl ControlRequest {
    pub fn agent_id(&self) -> &str {
        self.agent_id.as_deref().unwrap_or(DEFAULT_AGENT_ID)
    }

    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            drone: DroneState {
                pos: self.drone.position.into(),
                vel: self.drone.velocity.into(),
                yaw: self.drone.yaw,
                max_turn: self.drone.max_turn,
                target_alt: self.drone.target_alt,
                speed: self.drone.speed,
            },
            target: self.locked_target.as_ref().map(|t| LockedTarget {
                pos: t.position.into(),
                vel: t.velocity.into(),
            }),
            terrain: TerrainSample {
                height_at_drone: self.terrain.height_at_drone,
                ahead_max_height: self.terrain.ahead_max_height,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| Obstacle { pos: Vector2::new(o.pos.x, o.pos.z), radius: o.radius })
                .collect(),
            dt: self.dt,
        }
    }
}

/// Whether a required field counts as supplied. `dt` only has to be non-null, so
/// a zero step is accepted; the structured fields must also be non-empty.
fn is_supplied(key: &str, v: Option<&Value>) -> bool {
    match (key, v) {
        (_, None | Some(Value::Null)) => false,
        ("dt", Some(_)) => true,
        (_, Some(Value::Object(m))) => !m.is_empty(),
        (_, Some(Value::Array(a))) => !a.is_empty(),
        (_, Some(Value::String(s))) => !s.is_empty(),
        (_, Some(Value::Bool(b))) => *b,
        (_, Some(Value::Number(n))) => n.as_f64() != Some(0.0),
    }
}

/// Decode a request body.
///
/// `Malformed` covers bodies that carry no data at all (empty, not JSON, not an
/// object, `{}`). `Incomplete` covers a required field that is missing or empty.
/// `Invalid` covers everything else that fails to decode, such as a null nested
/// member or a mistyped value; callers treat it as a fault, not a client error.
pub fn parse_request(body: &[u8]) -> Result<ControlRequest, RequestError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| RequestError::Malformed)?;
    let fields = match &value {
        Value::Object(m) if !m.is_empty() => m,
        _ => return Err(RequestError::Malformed),
    };
    if !REQUIRED_FIELDS.iter().all(|k| is_supplied(k, fields.get(*k))) {
        return Err(RequestError::Incomplete);
    }
    serde_json::from_value(value).map_err(|e| RequestError::Invalid(e.to_string()))
}

// ---------------------------------------------------------------------------
// Response schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ControlsDto {
    pub yaw: f64,
    pub throttle: f64,
    pub pitch: f64,
}

impl From<ControlCommand> for ControlsDto {
    fn from(c: ControlCommand) -> Self {
        Self { yaw: c.yaw, throttle: c.throttle, pitch: c.pitch }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlResponse {
    pub controls: ControlsDto,
    pub search_state: SearchPattern,
    pub drone_status: DroneStatus,
}

impl From<ControlOutput> for ControlResponse {
    fn from(out: ControlOutput) -> Self {
        Self {
            controls: out.command.into(),
            search_state: out.search,
            drone_status: out.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
