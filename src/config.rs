//! Body configuration and the fallback rules applied to degenerate values.

use std::fmt;
use std::path::Path;

use cgmath::{InnerSpace, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Threshold used for every "effectively zero" comparison on scalars.
pub const EPSILON: f32 = 1e-5;

/// Squared-length threshold below which a vector counts as the zero vector.
pub(crate) const ZERO_VECTOR_SQ: f32 = 1e-10;

/// Replacement for a non-positive length, width or height.
pub const DEFAULT_DIMENSION: f32 = 1.0;
/// Replacement for a non-positive mass.
pub const DEFAULT_MASS: f32 = 1.0;
/// Replacement for a non-positive per-tick thrust ramp step.
pub const DEFAULT_RAMP_STEP: f32 = 0.1;
/// Replacement for a zero thrust vector.
pub const DEFAULT_THRUST: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

pub(crate) fn is_zero_vector(v: Vector3<f32>) -> bool {
    v.magnitude2() < ZERO_VECTOR_SQ
}

// NaN counts as degenerate too.
fn is_degenerate(value: f32) -> bool {
    !(value > EPSILON)
}

/// Static description of a box-shaped body with one thruster.
///
/// Dimensions map onto axes as X = `length`, Y = `height`, Z = `width`.
/// `thruster_attachment_point` is relative to the center of mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrustBodyConfig {
    pub length: f32,
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    pub thruster_attachment_point: Vector3<f32>,
    pub thrust_vector: Vector3<f32>,
    /// Amount added to the thrust factor on every tick until it reaches 1.
    pub thrust_ramp_time_secs: f32,
}

impl Default for ThrustBodyConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_DIMENSION,
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            mass: DEFAULT_MASS,
            thruster_attachment_point: Vector3::new(0.0, 0.0, 0.0),
            thrust_vector: DEFAULT_THRUST,
            thrust_ramp_time_secs: DEFAULT_RAMP_STEP,
        }
    }
}

/// A configuration value that was replaced because it was degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFallback {
    Length { given: f32 },
    Width { given: f32 },
    Height { given: f32 },
    Mass { given: f32 },
    RampTime { given: f32 },
    ZeroThrust,
}

impl fmt::Display for ConfigFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { given } => write!(f, "length {given} -> {DEFAULT_DIMENSION}"),
            Self::Width { given } => write!(f, "width {given} -> {DEFAULT_DIMENSION}"),
            Self::Height { given } => write!(f, "height {given} -> {DEFAULT_DIMENSION}"),
            Self::Mass { given } => write!(f, "mass {given} -> {DEFAULT_MASS}"),
            Self::RampTime { given } => {
                write!(f, "thrust ramp time {given} -> {DEFAULT_RAMP_STEP}")
            }
            Self::ZeroThrust => write!(f, "zero thrust vector -> {:?}", DEFAULT_THRUST),
        }
    }
}

impl ThrustBodyConfig {
    /// Replace degenerate values with their defaults.
    ///
    /// Non-positive (or NaN) scalars become the documented fallback and a zero
    /// thrust vector becomes +Y. Each replacement is returned and logged.
    pub fn sanitize(mut self) -> (Self, Vec<ConfigFallback>) {
        let mut fallbacks = Vec::new();

        if is_degenerate(self.length) {
            fallbacks.push(ConfigFallback::Length { given: self.length });
            self.length = DEFAULT_DIMENSION;
        }
        if is_degenerate(self.height) {
            fallbacks.push(ConfigFallback::Height { given: self.height });
            self.height = DEFAULT_DIMENSION;
        }
        if is_degenerate(self.width) {
            fallbacks.push(ConfigFallback::Width { given: self.width });
            self.width = DEFAULT_DIMENSION;
        }
        if is_degenerate(self.mass) {
            fallbacks.push(ConfigFallback::Mass { given: self.mass });
            self.mass = DEFAULT_MASS;
        }
        if is_degenerate(self.thrust_ramp_time_secs) {
            fallbacks.push(ConfigFallback::RampTime {
                given: self.thrust_ramp_time_secs,
            });
            self.thrust_ramp_time_secs = DEFAULT_RAMP_STEP;
        }
        if is_zero_vector(self.thrust_vector) {
            fallbacks.push(ConfigFallback::ZeroThrust);
            self.thrust_vector = DEFAULT_THRUST;
        }

        for fallback in &fallbacks {
            log::warn!("config fallback: {fallback}");
        }

        (self, fallbacks)
    }

    /// Re-express an attachment point given in model space relative to `center_of_mass`.
    pub fn with_center_of_mass(mut self, center_of_mass: Vector3<f32>) -> Self {
        self.thruster_attachment_point -= center_of_mass;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
