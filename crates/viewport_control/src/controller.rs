//! Orbit camera controller.
//!
//! Every tick has two phases:
//!
//! 1. **Accumulate** — [`OrbitController::handle_input`] (or the individual
//!    [`pan`], [`wheel`], [`rotate_pixels`] calls) records the tick's input.
//!    Panning moves the transform immediately; rotation and zoom are only
//!    recorded in the [`PendingInput`].
//! 2. **Apply** — [`OrbitController::update_transform`] re-reads the camera
//!    offset from the transform, applies and clears the pending input,
//!    clamps everything to the settings and writes position and orientation
//!    back.
//!
//! The spherical state is rebuilt from the transform on every apply, so a
//! host that moves the camera between ticks is picked up rather than
//! overwritten.
//!
//! [`pan`]: OrbitController::pan
//! [`wheel`]: OrbitController::wheel
//! [`rotate_pixels`]: OrbitController::rotate_pixels

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use log::{debug, trace, warn};
use viewport_core::{InputSource, Spherical, TransformSink, Viewport};

use crate::bindings::ControlBindings;
use crate::pending::PendingInput;
use crate::settings::OrbitSettings;

/// Zoom factor of a single wheel step at `zoom_speed = 1`.
pub const ZOOM_STEP: f32 = 0.95;

#[derive(Debug, Clone)]
pub struct OrbitController {
    settings: OrbitSettings,
    bindings: ControlBindings,
    target: Vec3,
    spherical: Spherical,
    pending: PendingInput,
    /// Hemisphere the camera was left in by the last apply; see
    /// [`viewport_core::spherical`] for why it must be carried over.
    at_the_back: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}

impl OrbitController {
    /// Creates a controller orbiting the origin with the default bindings.
    ///
    /// `settings` are passed through [`OrbitSettings::sanitized`].
    pub fn new(settings: OrbitSettings) -> Self {
        let mut controller = Self {
            settings: OrbitSettings::default(),
            bindings: ControlBindings::default(),
            target: Vec3::ZERO,
            spherical: Spherical::default(),
            pending: PendingInput::IDLE,
            at_the_back: false,
        };
        controller.set_settings(settings);
        controller
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn with_bindings(mut self, bindings: ControlBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// The point the camera orbits.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Moves the orbit centre without moving the camera; the next apply
    /// turns the camera towards it.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    /// Replaces the settings, correcting them as described in
    /// [`OrbitSettings::sanitized`].
    pub fn set_settings(&mut self, settings: OrbitSettings) {
        let settings = settings.sanitized();
        if let Err(err) = self.spherical.set_y_axis(settings.up) {
            // unreachable after sanitizing, keep the previous axis
            warn!("{err}");
        }
        if settings.up != self.settings.up {
            self.at_the_back = false;
        }
        self.settings = settings;
    }

    pub fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut ControlBindings {
        &mut self.bindings
    }

    /// Camera offset from the target as of the last apply.
    pub fn spherical(&self) -> &Spherical {
        &self.spherical
    }

    /// Whether the last apply left the camera in the back hemisphere, i.e.
    /// with its roll reference flipped.
    pub fn at_the_back(&self) -> bool {
        self.at_the_back
    }

    /// Input recorded since the last apply.
    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }

    // ── accumulate ─────────────────────────────────────────────────────────

    /// Moves camera and target together by an offset in camera space.
    pub fn pan<T: TransformSink + ?Sized>(&mut self, transform: &mut T, local_offset: Vec3) {
        let world_offset = transform.rotation() * local_offset;
        transform.translate(local_offset);
        self.target += world_offset;
    }

    /// Records one zoom step towards the target.
    pub fn zoom_in(&mut self) {
        let factor = self.zoom_factor();
        self.pending.zoom_in(factor);
    }

    /// Records one zoom step away from the target.
    pub fn zoom_out(&mut self) {
        let factor = self.zoom_factor();
        self.pending.zoom_out(factor);
    }

    /// Records a wheel movement.  Only the sign matters: positive deltas
    /// (scrolling down) step away from the target, negative ones towards it.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y > 0.0 {
            self.zoom_out();
        } else if delta_y < 0.0 {
            self.zoom_in();
        }
    }

    /// Records a drag of `delta` pixels.  Dragging across the whole viewport
    /// turns a full circle (times `rotate_speed`).
    pub fn rotate_pixels(&mut self, delta: Vec2, viewport: Viewport) {
        let radians = TAU * delta / viewport.size() * self.settings.rotate_speed;
        self.pending.rotate(-radians.x, -radians.y);
    }

    /// Records a rotation in radians, added to azimuth and polar angle.
    pub fn rotate(&mut self, d_theta: f32, d_phi: f32) {
        self.pending.rotate(d_theta, d_phi);
    }

    /// Records a fixed change of orbit distance.
    pub fn dolly(&mut self, distance: f32) {
        self.pending.dolly(distance);
    }

    /// Reads one tick of input: pan keys, wheel, and modifier-drag rotation.
    pub fn handle_input<I, T>(&mut self, input: &I, transform: &mut T, viewport: Viewport)
    where
        I: InputSource + ?Sized,
        T: TransformSink + ?Sized,
    {
        let offsets: Vec<Vec3> = self.bindings.pan_offsets(input).collect();
        for offset in offsets {
            self.pan(transform, offset);
        }

        self.wheel(input.wheel_delta());

        if self.bindings.is_rotating(input) {
            self.rotate_pixels(input.pointer_delta(), viewport);
        }
    }

    // ── apply ──────────────────────────────────────────────────────────────

    /// Applies the pending input and writes the new camera pose.
    ///
    /// Call exactly once per tick, after all input has been recorded.
    pub fn update_transform<T: TransformSink + ?Sized>(&mut self, transform: &mut T) {
        let pending = self.pending.consume();
        let s = &self.settings;
        let spherical = &mut self.spherical;

        spherical.set_from_vec3(transform.position() - self.target, self.at_the_back);

        spherical.theta += pending.theta;
        spherical.phi += pending.phi;
        // max/min rather than `clamp` so a bad range can never panic
        spherical.theta = spherical.theta.min(s.max_azimuth_angle).max(s.min_azimuth_angle);
        spherical.phi = spherical.phi.min(s.max_polar_angle).max(s.min_polar_angle);
        // a phi clamped onto a pole stays on the side the limits allow
        spherical.make_safe_toward(0.5 * (s.min_polar_angle + s.max_polar_angle));

        spherical.radius += pending.zoom_fragment(spherical.radius);
        spherical.radius = spherical.radius.min(s.max_distance).max(s.min_distance);

        let (offset, at_the_back) = spherical.set_to_vec3();
        if at_the_back != self.at_the_back {
            debug!(
                "camera moved to the {} hemisphere (phi {:.4})",
                if at_the_back { "back" } else { "front" },
                spherical.phi
            );
        }
        self.at_the_back = at_the_back;

        let up = if at_the_back { -spherical.up() } else { spherical.up() };
        transform.set_position(self.target + offset);
        transform.look_at(self.target, up);

        trace!(
            "orbit r={:.4} phi={:.4} theta={:.4} pos={}",
            spherical.radius,
            spherical.phi,
            spherical.theta,
            transform.position()
        );
    }

    /// One full tick: [`handle_input`](Self::handle_input) followed by
    /// [`update_transform`](Self::update_transform).
    pub fn update<I, T>(&mut self, input: &I, transform: &mut T, viewport: Viewport)
    where
        I: InputSource + ?Sized,
        T: TransformSink + ?Sized,
    {
        self.handle_input(input, transform, viewport);
        self.update_transform(transform);
    }

    fn zoom_factor(&self) -> f32 {
        ZOOM_STEP.powf(self.settings.zoom_speed)
    }
}
