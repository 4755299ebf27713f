//! Data-driven physics constants
//!
//! All values are in logical units per tick. `units_scale` converts them to
//! viewport pixels (logical pixels per unit), so the feel stays the same on any
//! display. Physical density conversion belongs to the host.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physics and obstacle tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to velocity every tick
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = upward)
    pub flap_velocity: f32,
    /// Horizontal pipe speed per tick
    pub pipe_speed: f32,
    /// Width of each pipe pair
    pub pipe_width: f32,
    /// Height of the passable gate
    pub pipe_gap: f32,
    /// Logical pixels per unit
    pub units_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.45,
            flap_velocity: -9.0,
            pipe_speed: 6.0,
            pipe_width: 60.0,
            pipe_gap: 180.0,
            units_scale: 1.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
            ("pipe_speed", self.pipe_speed),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("units_scale", self.units_scale),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        let positive = [
            ("pipe_speed", self.pipe_speed),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("units_scale", self.units_scale),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        if self.gravity < 0.0 {
            return Err(TuningError::Invalid {
                field: "gravity",
                reason: "must not be negative",
            });
        }
        if self.flap_velocity >= 0.0 {
            return Err(TuningError::Invalid {
                field: "flap_velocity",
                reason: "must be negative (upward)",
            });
        }
        Ok(())
    }

    /// Effective per-tick values in viewport pixels
    pub fn scaled(&self) -> Tuning {
        let s = self.units_scale;
        Tuning {
            gravity: self.gravity * s,
            flap_velocity: self.flap_velocity * s,
            pipe_speed: self.pipe_speed * s,
            pipe_width: self.pipe_width * s,
            pipe_gap: self.pipe_gap * s,
            units_scale: 1.0,
        }
    }
}
