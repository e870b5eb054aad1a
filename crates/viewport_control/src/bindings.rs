use glam::Vec3;
use viewport_core::{InputSource, KeyCode, MouseButton};

/// Step applied by one tick of keyboard panning, in local units.
pub const PAN_STEP: f32 = 0.1;

/// Which keys and buttons drive an [`OrbitController`](crate::OrbitController).
///
/// Nothing happens unless the `modifier` key is held: with it, the pan keys
/// move camera and target together and dragging with `rotate_button`
/// orbits.  Pan keys are organised in groups of mutually exclusive keys; in
/// each group only the first held key counts, so holding two opposite keys
/// never cancels out to a zero step.
///
/// # Example
/// ```rust,ignore
/// use viewport_control::ControlBindings;
/// use viewport_core::{KeyCode, MouseButton};
/// use glam::Vec3;
///
/// let mut bindings = ControlBindings::new(KeyCode::ShiftLeft, MouseButton::Right);
/// bindings.bind_group([
///     (KeyCode::ArrowUp,   Vec3::new(0.0, 0.0, -0.5)),
///     (KeyCode::ArrowDown, Vec3::new(0.0, 0.0,  0.5)),
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ControlBindings {
    /// Key that must be held for any camera input to register.
    pub modifier: KeyCode,
    /// Button that orbits while dragged.
    pub rotate_button: MouseButton,
    groups: Vec<Vec<(KeyCode, Vec3)>>,
}

impl Default for ControlBindings {
    /// Left Alt as modifier, left-button drag, and the pan layout
    /// S/W (back/forward), A/D (left/right), Q/E (vertical).
    fn default() -> Self {
        let mut bindings = Self::new(KeyCode::AltLeft, MouseButton::Left);
        bindings.bind_group([
            (KeyCode::KeyS, Vec3::new(0.0, 0.0, PAN_STEP)),
            (KeyCode::KeyW, Vec3::new(0.0, 0.0, -PAN_STEP)),
        ]);
        bindings.bind_group([
            (KeyCode::KeyA, Vec3::new(-PAN_STEP, 0.0, 0.0)),
            (KeyCode::KeyD, Vec3::new(PAN_STEP, 0.0, 0.0)),
        ]);
        bindings.bind_group([
            (KeyCode::KeyQ, Vec3::new(0.0, -PAN_STEP, 0.0)),
            (KeyCode::KeyE, Vec3::new(0.0, PAN_STEP, 0.0)),
        ]);
        bindings
    }
}

impl ControlBindings {
    /// Creates bindings with no pan keys.
    pub fn new(modifier: KeyCode, rotate_button: MouseButton) -> Self {
        Self {
            modifier,
            rotate_button,
            groups: Vec::new(),
        }
    }

    /// Adds a group of mutually exclusive pan keys, highest priority first.
    ///
    /// Each key maps to a local-space offset applied once per tick while it
    /// is held.  A key already bound elsewhere is moved into this group.
    pub fn bind_group(&mut self, keys: impl IntoIterator<Item = (KeyCode, Vec3)>) {
        let group: Vec<_> = keys.into_iter().collect();
        for (key, _) in &group {
            self.unbind(*key);
        }
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    /// Removes the binding for `key`, if any.
    pub fn unbind(&mut self, key: KeyCode) {
        for group in &mut self.groups {
            group.retain(|(k, _)| *k != key);
        }
        self.groups.retain(|g| !g.is_empty());
    }

    /// Removes all pan keys.  Modifier and rotate button are kept.
    pub fn clear_pan(&mut self) {
        self.groups.clear();
    }

    /// Local offsets to pan by this tick, one per group with a held key.
    pub fn pan_offsets<'a, I>(&'a self, input: &'a I) -> impl Iterator<Item = Vec3> + 'a
    where
        I: InputSource + ?Sized,
    {
        let active = input.is_key_held(self.modifier);
        self.groups
            .iter()
            .filter(move |_| active)
            .filter_map(move |group| {
                group
                    .iter()
                    .find(|(key, _)| input.is_key_held(*key))
                    .map(|(_, offset)| *offset)
            })
    }

    /// Returns true while a drag should orbit the camera.
    pub fn is_rotating<I: InputSource + ?Sized>(&self, input: &I) -> bool {
        input.is_key_held(self.modifier) && input.is_button_held(self.rotate_button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewport_core::InputState;

    fn held(keys: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.update_key(*key, true);
        }
        input
    }

    #[test]
    fn modifier_is_required() {
        let bindings = ControlBindings::default();
        let input = held(&[KeyCode::KeyW]);
        assert_eq!(bindings.pan_offsets(&input).count(), 0);

        let input = held(&[KeyCode::AltLeft, KeyCode::KeyW]);
        let offsets: Vec<_> = bindings.pan_offsets(&input).collect();
        assert_eq!(offsets, vec![Vec3::new(0.0, 0.0, -PAN_STEP)]);
    }

    #[test]
    fn first_key_in_group_wins() {
        let bindings = ControlBindings::default();
        let input = held(&[KeyCode::AltLeft, KeyCode::KeyW, KeyCode::KeyS]);
        let offsets: Vec<_> = bindings.pan_offsets(&input).collect();
        assert_eq!(offsets, vec![Vec3::new(0.0, 0.0, PAN_STEP)]);
    }

    #[test]
    fn groups_combine() {
        let bindings = ControlBindings::default();
        let input = held(&[KeyCode::AltLeft, KeyCode::KeyW, KeyCode::KeyD, KeyCode::KeyE]);
        let total: Vec3 = bindings.pan_offsets(&input).sum();
        assert_eq!(total, Vec3::new(PAN_STEP, PAN_STEP, -PAN_STEP));
    }

    #[test]
    fn rebinding_moves_key() {
        let mut bindings = ControlBindings::default();
        bindings.bind_group([(KeyCode::KeyW, Vec3::Y)]);
        let input = held(&[KeyCode::AltLeft, KeyCode::KeyW]);
        let offsets: Vec<_> = bindings.pan_offsets(&input).collect();
        assert_eq!(offsets, vec![Vec3::Y]);

        bindings.unbind(KeyCode::KeyW);
        assert_eq!(bindings.pan_offsets(&input).count(), 0);

        bindings.clear_pan();
        let input = held(&[KeyCode::AltLeft, KeyCode::KeyA]);
        assert_eq!(bindings.pan_offsets(&input).count(), 0);
    }

    #[test]
    fn rotating_needs_modifier_and_button() {
        let bindings = ControlBindings::default();
        let mut input = held(&[KeyCode::AltLeft]);
        assert!(!bindings.is_rotating(&input));
        input.update_mouse_button(MouseButton::Left, true);
        assert!(bindings.is_rotating(&input));
        input.update_key(KeyCode::AltLeft, false);
        assert!(!bindings.is_rotating(&input));
    }
}
