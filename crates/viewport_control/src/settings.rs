//! Limits and speeds of an [`OrbitController`](crate::OrbitController).
//!
//! Settings are plain numbers so a host can tweak them between ticks, and
//! they deserialize from TOML so they can live in a config file:
//!
//! ```toml
//! min_polar_angle = 0.1
//! max_distance = 250.0
//! min_azimuth_angle = -inf
//! zoom_speed = 2.0
//! up = [0.0, 0.0, 1.0]
//! ```
//!
//! Missing keys keep their defaults.

use std::f32::consts::PI;
use std::path::Path;

use glam::Vec3;
use log::warn;
use serde::Deserialize;

use crate::error::OrbitError;

/// Smallest orbit distance the controller accepts.  A zero distance would
/// leave the azimuth undefined.
pub const MIN_DISTANCE_FLOOR: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrbitSettings {
    /// Smallest polar angle (radians from the up axis).
    ///
    /// Default: `1.0`
    pub min_polar_angle: f32,

    /// Largest polar angle (radians from the up axis).
    ///
    /// Default: 179° in radians
    pub max_polar_angle: f32,

    /// Smallest azimuth (radians around the up axis).
    ///
    /// Default: `-inf`
    pub min_azimuth_angle: f32,

    /// Largest azimuth (radians around the up axis).
    ///
    /// Default: `inf`
    pub max_azimuth_angle: f32,

    /// Closest the camera may get to the target.
    ///
    /// Default: `0.1`
    pub min_distance: f32,

    /// Farthest the camera may get from the target.
    ///
    /// Default: `inf`
    pub max_distance: f32,

    /// Multiplier on drag rotation; a drag across the whole viewport is one
    /// full turn at `1.0`.
    ///
    /// Default: `1.0`
    pub rotate_speed: f32,

    /// Exponent applied to the per-step zoom factor `0.95`.
    ///
    /// Default: `1.0`
    pub zoom_speed: f32,

    /// World axis the camera orbits around.
    ///
    /// Default: `+Y`
    pub up: Vec3,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            min_polar_angle: 1.0,
            max_polar_angle: 179.0 / 180.0 * PI,
            min_azimuth_angle: f32::NEG_INFINITY,
            max_azimuth_angle: f32::INFINITY,
            min_distance: 0.1,
            max_distance: f32::INFINITY,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            up: Vec3::Y,
        }
    }
}

impl OrbitSettings {
    /// Parses settings from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, OrbitError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OrbitError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OrbitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reports the first setting [`sanitized`](Self::sanitized) would have
    /// to correct.
    pub fn validate(&self) -> Result<(), OrbitError> {
        for (name, value) in self.bounds() {
            if value.is_nan() {
                return Err(OrbitError::NanBound(name));
            }
        }
        for (name, min, max) in self.ranges() {
            if min > max {
                return Err(OrbitError::InvertedRange { name, min, max });
            }
        }
        if !(self.min_distance.is_finite() && self.min_distance >= MIN_DISTANCE_FLOOR) {
            return Err(OrbitError::InvalidMinDistance(self.min_distance));
        }
        for (name, value) in [("rotate_speed", self.rotate_speed), ("zoom_speed", self.zoom_speed)] {
            if !value.is_finite() {
                return Err(OrbitError::NonFiniteSpeed { name, value });
            }
        }
        if self.up.try_normalize().is_none() {
            return Err(viewport_core::SphericalError::DegenerateUpAxis(self.up).into());
        }
        Ok(())
    }

    /// Returns a copy with every problem [`validate`](Self::validate) would
    /// report corrected:
    ///
    /// - NaN bounds and non-finite speeds fall back to their defaults;
    /// - inverted min/max pairs are swapped;
    /// - `min_distance` is raised to [`MIN_DISTANCE_FLOOR`] (and
    ///   `max_distance` with it if needed);
    /// - a degenerate `up` becomes `+Y`.
    ///
    /// Each correction is logged as a warning.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut s = *self;

        fix_nan("min_polar_angle", &mut s.min_polar_angle, defaults.min_polar_angle);
        fix_nan("max_polar_angle", &mut s.max_polar_angle, defaults.max_polar_angle);
        fix_nan("min_azimuth_angle", &mut s.min_azimuth_angle, defaults.min_azimuth_angle);
        fix_nan("max_azimuth_angle", &mut s.max_azimuth_angle, defaults.max_azimuth_angle);
        fix_nan("min_distance", &mut s.min_distance, defaults.min_distance);
        fix_nan("max_distance", &mut s.max_distance, defaults.max_distance);

        order("polar angle", &mut s.min_polar_angle, &mut s.max_polar_angle);
        order("azimuth angle", &mut s.min_azimuth_angle, &mut s.max_azimuth_angle);
        order("distance", &mut s.min_distance, &mut s.max_distance);

        if !s.min_distance.is_finite() {
            warn!("min_distance {} is not finite, using {}", s.min_distance, defaults.min_distance);
            s.min_distance = defaults.min_distance;
        }
        if s.min_distance < MIN_DISTANCE_FLOOR {
            warn!("min_distance {} raised to {}", s.min_distance, MIN_DISTANCE_FLOOR);
            s.min_distance = MIN_DISTANCE_FLOOR;
        }
        if s.max_distance < s.min_distance {
            warn!("max_distance {} raised to {}", s.max_distance, s.min_distance);
            s.max_distance = s.min_distance;
        }

        if !s.rotate_speed.is_finite() {
            warn!("rotate_speed {} is not finite, using {}", s.rotate_speed, defaults.rotate_speed);
            s.rotate_speed = defaults.rotate_speed;
        }
        if !s.zoom_speed.is_finite() {
            warn!("zoom_speed {} is not finite, using {}", s.zoom_speed, defaults.zoom_speed);
            s.zoom_speed = defaults.zoom_speed;
        }

        if s.up.try_normalize().is_none() {
            warn!("up axis {} has no direction, using +Y", s.up);
            s.up = Vec3::Y;
        }
        s
    }

    fn bounds(&self) -> [(&'static str, f32); 6] {
        [
            ("min_polar_angle", self.min_polar_angle),
            ("max_polar_angle", self.max_polar_angle),
            ("min_azimuth_angle", self.min_azimuth_angle),
            ("max_azimuth_angle", self.max_azimuth_angle),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
        ]
    }

    fn ranges(&self) -> [(&'static str, f32, f32); 3] {
        [
            ("polar angle", self.min_polar_angle, self.max_polar_angle),
            ("azimuth angle", self.min_azimuth_angle, self.max_azimuth_angle),
            ("distance", self.min_distance, self.max_distance),
        ]
    }
}

fn fix_nan(name: &str, value: &mut f32, default: f32) {
    if value.is_nan() {
        warn!("{name} is NaN, using {default}");
        *value = default;
    }
}

fn order(name: &str, min: &mut f32, max: &mut f32) {
    if *min > *max {
        warn!("{name} range is inverted ({} > {}), swapping", min, max);
        std::mem::swap(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = OrbitSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.sanitized(), s);
        assert!((s.max_polar_angle.to_degrees() - 179.0).abs() < 1e-3);
    }

    #[test]
    fn parses_partial_toml() {
        let s = OrbitSettings::from_toml_str(
            r#"
            max_distance = 50.0
            min_azimuth_angle = -1.5
            zoom_speed = 2.0
            up = [0.0, 0.0, 1.0]
            "#,
        )
        .unwrap();
        assert_eq!(s.max_distance, 50.0);
        assert_eq!(s.min_azimuth_angle, -1.5);
        assert_eq!(s.zoom_speed, 2.0);
        assert_eq!(s.up, Vec3::Z);
        // untouched keys keep defaults
        assert_eq!(s.min_distance, 0.1);
        assert_eq!(s.max_azimuth_angle, f32::INFINITY);
    }

    #[test]
    fn parses_infinite_bounds() {
        let s = OrbitSettings::from_toml_str("min_distance = 1.0\nmax_distance = inf").unwrap();
        assert_eq!(s.max_distance, f32::INFINITY);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            OrbitSettings::from_toml_str("max_zoom = 3.0"),
            Err(OrbitError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = OrbitSettings::load("/definitely/not/here/orbit.toml").unwrap_err();
        assert!(matches!(err, OrbitError::Io { .. }));
    }

    #[test]
    fn validate_reports_inverted_range() {
        let s = OrbitSettings {
            min_distance: 10.0,
            max_distance: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            s.validate(),
            Err(OrbitError::InvertedRange { name: "distance", .. })
        ));
    }

    #[test]
    fn validate_reports_zero_distance_and_bad_up() {
        let s = OrbitSettings {
            min_distance: 0.0,
            ..Default::default()
        };
        assert!(matches!(s.validate(), Err(OrbitError::InvalidMinDistance(_))));

        let s = OrbitSettings {
            up: Vec3::ZERO,
            ..Default::default()
        };
        assert!(matches!(s.validate(), Err(OrbitError::UpAxis(_))));
    }

    #[test]
    fn sanitized_swaps_and_floors() {
        let s = OrbitSettings {
            min_polar_angle: 2.0,
            max_polar_angle: 0.5,
            min_distance: -3.0,
            max_distance: -4.0,
            rotate_speed: f32::NAN,
            up: Vec3::ZERO,
            ..Default::default()
        }
        .sanitized();

        assert_eq!((s.min_polar_angle, s.max_polar_angle), (0.5, 2.0));
        assert_eq!(s.min_distance, MIN_DISTANCE_FLOOR);
        assert_eq!(s.max_distance, MIN_DISTANCE_FLOOR);
        assert_eq!(s.rotate_speed, 1.0);
        assert_eq!(s.up, Vec3::Y);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn sanitized_replaces_nan_bounds() {
        let s = OrbitSettings {
            max_azimuth_angle: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(s.validate(), Err(OrbitError::NanBound("max_azimuth_angle"))));
        assert_eq!(s.sanitized().max_azimuth_angle, f32::INFINITY);
    }
}
