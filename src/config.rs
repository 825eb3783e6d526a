//! Numeric thresholds used by the intersection tests

use crate::error::ConfigError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Rays with `|edge1 · (D × edge2)|` below this are treated as parallel to a triangle.
pub const TRIANGLE_PARALLEL_EPSILON: f32 = 1e-7;

/// A sphere is only hit when the discriminant is strictly above this, so tangent rays miss.
pub const SPHERE_DISCRIMINANT_THRESHOLD: f32 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tolerances {
    pub triangle_parallel_epsilon: f32,
    pub sphere_discriminant_threshold: f32,
}

impl Tolerances {
    pub const DEFAULT: Tolerances = Tolerances {
        triangle_parallel_epsilon: TRIANGLE_PARALLEL_EPSILON,
        sphere_discriminant_threshold: SPHERE_DISCRIMINANT_THRESHOLD,
    };

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let tolerances: Tolerances = toml::from_str(source)?;
        tolerances.validate()?;

        Ok(tolerances)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tolerances = Self::from_toml_str(&source)?;
        info!("Loaded tolerances from {}: {:?}", path.display(), tolerances);

        Ok(tolerances)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let epsilon = self.triangle_parallel_epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ConfigError::Invalid {
                name: "triangle_parallel_epsilon",
                reason: format!("expected a finite value >= 0, got {}", epsilon),
            });
        }

        let threshold = self.sphere_discriminant_threshold;
        if !threshold.is_finite() {
            return Err(ConfigError::Invalid {
                name: "sphere_discriminant_threshold",
                reason: format!("expected a finite value, got {}", threshold),
            });
        }
        if threshold < 0.0 {
            warn!(
                "sphere_discriminant_threshold is {}, tangent and near-tangent rays will count as hits",
                threshold
            );
        }

        Ok(())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::DEFAULT
    }
}
