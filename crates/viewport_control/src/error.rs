use std::path::PathBuf;

use thiserror::Error;
use viewport_core::SphericalError;

/// Problems found in [`OrbitSettings`](crate::OrbitSettings) or while
/// loading them.
///
/// The controller itself never fails: it corrects bad settings on the way in
/// (see [`OrbitSettings::sanitized`](crate::OrbitSettings::sanitized)).  These
/// errors exist for hosts that prefer to reject such settings up front.
#[derive(Debug, Error)]
pub enum OrbitError {
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("min_distance must be positive and finite, got {0}")]
    InvalidMinDistance(f32),
    #[error("{0} is NaN")]
    NanBound(&'static str),
    #[error("{name} must be finite, got {value}")]
    NonFiniteSpeed { name: &'static str, value: f32 },
    #[error(transparent)]
    UpAxis(#[from] SphericalError),
    #[error("failed to read settings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings")]
    Parse(#[from] toml::de::Error),
}
