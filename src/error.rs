use std::path::PathBuf;
use thiserror::Error;

/// Invalid geometry handed to a primitive constructor.
///
/// These are scene-construction errors. Intersection tests never fail, they
/// either hit or miss.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("sphere radius must be non-zero")]
    ZeroRadius,

    #[error("sphere radius must be finite, got {0}")]
    NonFiniteRadius(f32),

    #[error("sphere center must be finite, got {0:?}")]
    NonFiniteCenter([f32; 3]),

    #[error("triangle vertex {index} must be finite, got {value:?}")]
    NonFiniteVertex { index: usize, value: [f32; 3] },

    #[error("triangle has zero area, its vertices are collinear")]
    DegenerateTriangle,

    #[error("triangle is too large, its face normal overflows f32")]
    NormalOverflow,
}

/// Errors from reading or validating `Tolerances`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tolerances from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tolerances")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tolerance `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}
