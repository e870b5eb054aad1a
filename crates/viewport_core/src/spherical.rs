//! Spherical coordinates relative to a configurable up axis.
//!
//! `Spherical` converts a Cartesian offset (typically camera minus target)
//! into `(radius, phi, theta)` and back:
//!
//! - `radius` — distance from the origin.
//! - `phi`    — polar angle measured from the up axis.  `0` and `π` are the
//!   poles, where the azimuth is undefined.
//! - `theta`  — azimuth around the up axis, `0` along the local +Z axis.
//!
//! # Back hemisphere
//!
//! An orbit that is allowed to sweep over a pole keeps going in the same
//! direction, so `phi` leaves `[0, π]` and ends up in `(π, 2π)`.  Such a
//! position is *at the back*: reading it back with a plain `acos`/`atan2`
//! would fold `phi` into `[0, π]` and rotate `theta` by half a turn, which
//! shows up as a jump.  [`Spherical::set_to_vec3`] therefore reports whether
//! the reconstructed offset is at the back, and the caller feeds that flag into
//! the next [`Spherical::set_from_vec3`] so the same parameterisation is kept
//! from frame to frame.
//!
//! ```rust,ignore
//! use glam::Vec3;
//! use viewport_core::Spherical;
//!
//! let mut s = Spherical::default();
//! s.set_from_vec3(Vec3::new(0.0, 0.0, 5.0), false);
//! s.theta += std::f32::consts::FRAC_PI_2;
//! let (offset, at_back) = s.set_to_vec3(); // ≈ (5, 0, 0), false
//! ```

use std::f32::consts::{PI, TAU};

use glam::{Mat3, Vec3};
use thiserror::Error;

/// Margin kept between `phi` and the nearest pole by [`Spherical::make_safe`].
pub const POLE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SphericalError {
    #[error("up axis {0} has no direction")]
    DegenerateUpAxis(Vec3),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
    up: Vec3,
    // columns are the local x/y/z axes in world space; y is `up`
    to_world: Mat3,
}

impl Default for Spherical {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl Spherical {
    /// Creates a coordinate with +Y as the up axis.
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self {
            radius,
            phi,
            theta,
            up: Vec3::Y,
            to_world: Mat3::IDENTITY,
        }
    }

    /// The normalised up axis polar angles are measured from.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Sets the axis `phi` is measured from.
    ///
    /// The remaining two axes are built from whichever world axis is least
    /// aligned with `up`, so any direction yields an orthonormal frame.  For
    /// `+Y` the frame is the identity.
    pub fn set_y_axis(&mut self, up: Vec3) -> Result<(), SphericalError> {
        let y_axis = up
            .try_normalize()
            .ok_or(SphericalError::DegenerateUpAxis(up))?;

        let a = y_axis.abs();
        let reference = if a.x <= a.y && a.x <= a.z {
            Vec3::X
        } else if a.y <= a.z {
            Vec3::Y
        } else {
            Vec3::Z
        };

        let z_axis = reference.cross(y_axis).normalize();
        let x_axis = y_axis.cross(z_axis);

        self.up = y_axis;
        self.to_world = Mat3::from_cols(x_axis, y_axis, z_axis);
        Ok(())
    }

    /// Assigns all three components at once.
    pub fn set(&mut self, radius: f32, phi: f32, theta: f32) {
        self.radius = radius;
        self.phi = phi;
        self.theta = theta;
    }

    /// Reads a Cartesian offset into spherical form.
    ///
    /// `at_back` selects the back-hemisphere parameterisation (see the module
    /// docs); pass the flag returned by the previous [`set_to_vec3`] call.
    /// A zero offset yields `phi = theta = 0`.
    ///
    /// [`set_to_vec3`]: Spherical::set_to_vec3
    pub fn set_from_vec3(&mut self, offset: Vec3, at_back: bool) {
        let local = self.to_world.transpose() * offset;
        self.radius = local.length();

        if self.radius == 0.0 {
            self.phi = 0.0;
            self.theta = 0.0;
            return;
        }

        let polar = (local.y / self.radius).clamp(-1.0, 1.0).acos();
        if at_back {
            self.phi = TAU - polar;
            self.theta = (-local.x).atan2(-local.z);
        } else {
            self.phi = polar;
            self.theta = local.x.atan2(local.z);
        }
    }

    /// Pulls `phi` at least [`POLE_EPSILON`] away from the poles bounding its
    /// current half turn.  `radius` and `theta` are left alone.
    ///
    /// A `phi` lying exactly on a pole is moved to the half turn above it.
    pub fn make_safe(&mut self) {
        self.make_safe_toward(f32::INFINITY);
    }

    /// Like [`make_safe`](Self::make_safe), but a `phi` lying exactly on a
    /// pole is moved into the half turn on the side of `toward`.
    ///
    /// Controllers pass the middle of their polar range, so a limit of
    /// exactly `π` ends up at `π − ε` instead of crossing to the back.
    pub fn make_safe_toward(&mut self, toward: f32) {
        let mut band = (self.phi / PI).floor();
        if band * PI == self.phi && toward < self.phi {
            band -= 1.0;
        }
        let lo = band * PI + POLE_EPSILON;
        let hi = (band + 1.0) * PI - POLE_EPSILON;
        // min/max instead of `clamp`: a NaN phi must not panic
        self.phi = self.phi.max(lo).min(hi);
    }

    /// Rebuilds the Cartesian offset in world space.
    ///
    /// `phi` is wrapped into `[0, 2π)` as a side effect.  The returned flag is
    /// `true` when the offset lies in the back hemisphere (`phi > π`).
    pub fn set_to_vec3(&mut self) -> (Vec3, bool) {
        let sin_phi_radius = self.phi.sin() * self.radius;
        let local = Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.radius * self.phi.cos(),
            sin_phi_radius * self.theta.cos(),
        );

        self.phi -= (self.phi / TAU).floor() * TAU;
        (self.to_world * local, self.phi > PI)
    }
}
