//! World-space camera transform: position and orientation.
//!
//! `Transform` is `Copy` and `Default`, making it easy to embed in any
//! struct.  Controllers never touch it directly; they go through the
//! [`TransformSink`] trait so a host engine can hand over its own node type
//! instead.

use glam::{Mat3, Quat, Vec3};

/// What an orbit controller needs from the transform it drives.
///
/// The forward axis is `−Z` in local space, `+Y` is local up.
pub trait TransformSink {
    /// World-space position.
    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    /// World-space orientation; rotates local vectors into world space.
    fn rotation(&self) -> Quat;

    /// Orient the forward axis towards `target`, using `up` as roll reference.
    fn look_at(&mut self, target: Vec3, up: Vec3);

    /// Move by an offset expressed in local space.
    fn translate(&mut self, local_offset: Vec3) {
        let position = self.position() + self.rotation() * local_offset;
        self.set_position(position);
    }
}

/// World-space transform component.
///
/// # Example
/// ```rust,ignore
/// use viewport_core::Transform;
/// use glam::Vec3;
///
/// let t = Transform::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
/// assert!((t.forward() - Vec3::NEG_Z).length() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform — at the origin, looking down `−Z`.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Construct with a world-space position and identity rotation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Construct with a position and a look-at rotation.
    ///
    /// `target` — the point to face; `up` — world-up hint (usually `Vec3::Y`).
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut t = Self::from_position(position);
        t.look_at(target, up);
        t
    }

    /// Rotate so that `−Z` points at `target`.
    ///
    /// If the target coincides with the position, or the view direction is
    /// parallel to `up`, the previous rotation is kept.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        let Some(right) = forward.cross(up).try_normalize() else {
            return;
        };
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
    }

    /// Apply a translation offset expressed in local space.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.position += self.rotation * offset;
    }

    /// Forward direction in world space (`−Z` rotated by the quaternion).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Up direction in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl TransformSink for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn look_at(&mut self, target: Vec3, up: Vec3) {
        Transform::look_at(self, target, up);
    }

    fn translate(&mut self, local_offset: Vec3) {
        self.translate_local(local_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_looks_down_negative_z() {
        let t = Transform::default();
        assert!((t.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((t.up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn looking_at_faces_target() {
        let t = Transform::looking_at(Vec3::new(3.0, 4.0, 5.0), Vec3::new(-1.0, 0.0, 2.0), Vec3::Y);
        let expected = (Vec3::new(-1.0, 0.0, 2.0) - t.position).normalize();
        assert!((t.forward() - expected).length() < 1e-5);
        // roll reference keeps the camera's up on the same side as world up
        assert!(t.up().dot(Vec3::Y) > 0.0);
    }

    #[test]
    fn flipped_up_rolls_camera_over() {
        let eye = Vec3::new(0.0, 1.0, 5.0);
        let upright = Transform::looking_at(eye, Vec3::ZERO, Vec3::Y);
        let flipped = Transform::looking_at(eye, Vec3::ZERO, Vec3::NEG_Y);
        assert!((upright.forward() - flipped.forward()).length() < 1e-5);
        assert!((upright.up() + flipped.up()).length() < 1e-5);
    }

    #[test]
    fn degenerate_look_at_keeps_rotation() {
        let mut t = Transform::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let before = t.rotation;

        t.look_at(t.position, Vec3::Y);
        assert_eq!(t.rotation, before);

        t.look_at(t.position + Vec3::Y, Vec3::Y);
        assert_eq!(t.rotation, before);
    }

    #[test]
    fn translate_is_local() {
        let mut t = Transform::looking_at(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);
        // local −Z is towards the target
        TransformSink::translate(&mut t, Vec3::new(0.0, 0.0, -1.0));
        assert!((t.position - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }
}
