//! Scripted input for the replay host.
//!
//! A script is a TOML document with the starting pose and a list of ticks:
//!
//! ```toml
//! target = [0.0, 0.0, 0.0]
//! camera = [0.0, 0.0, 5.0]
//! viewport = [800, 600]
//!
//! [settings]          # optional, same keys as a settings file
//! max_distance = 20.0
//!
//! [[tick]]
//! keys = ["AltLeft"]
//! buttons = ["Left"]
//! pointer = [12.0, 0.0]
//! wheel = 0.0
//! repeat = 4
//! ```
//!
//! Keys and buttons use `winit`'s `KeyCode` / `MouseButton` variant names.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Deserialize;
use viewport_control::OrbitSettings;
use viewport_core::{InputState, KeyCode, MouseButton, Viewport};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub target: Vec3,
    #[serde(default = "default_camera")]
    pub camera: Vec3,
    #[serde(default = "default_viewport")]
    pub viewport: [u32; 2],
    pub settings: Option<OrbitSettings>,
    #[serde(default, rename = "tick")]
    pub ticks: Vec<Tick>,
}

/// Input held for one or more consecutive ticks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tick {
    pub keys: Vec<KeyCode>,
    pub buttons: Vec<MouseButton>,
    /// Pointer movement in pixels, per tick.
    pub pointer: [f32; 2],
    /// Wheel movement, per tick.
    pub wheel: f32,
    pub repeat: u32,
}

impl Default for Tick {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            buttons: Vec::new(),
            pointer: [0.0, 0.0],
            wheel: 0.0,
            repeat: 1,
        }
    }
}

fn default_camera() -> Vec3 {
    Vec3::new(0.0, 0.0, 5.0)
}

fn default_viewport() -> [u32; 2] {
    [800, 600]
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport[0], self.viewport[1])
    }

    /// Total number of ticks once repeats are expanded.
    pub fn tick_count(&self) -> u64 {
        self.ticks.iter().map(|t| u64::from(t.repeat)).sum()
    }
}

impl Tick {
    /// Replaces the held state of `input` with this tick's and adds its
    /// deltas.  Call `input.end_frame()` after the tick has been processed.
    pub fn feed(&self, input: &mut InputState) {
        input.release_all();
        for key in &self.keys {
            input.update_key(*key, true);
        }
        for button in &self.buttons {
            input.update_mouse_button(*button, true);
        }
        input.add_mouse_motion(self.pointer[0], self.pointer[1]);
        input.add_wheel_delta(self.wheel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use viewport_core::InputSource;

    #[test]
    fn defaults_for_empty_script() {
        let script = Script::parse("").unwrap();
        assert_eq!(script.target, Vec3::ZERO);
        assert_eq!(script.camera, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(script.viewport(), Viewport::new(800, 600));
        assert!(script.settings.is_none());
        assert_eq!(script.tick_count(), 0);
    }

    #[test]
    fn parses_ticks_and_settings() {
        let script = Script::parse(
            r#"
            camera = [1.0, 2.0, 3.0]

            [settings]
            max_distance = 12.0

            [[tick]]
            keys = ["AltLeft", "KeyW"]
            buttons = ["Left"]
            pointer = [4.0, -2.0]
            repeat = 3

            [[tick]]
            wheel = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(script.camera, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(script.settings.map(|s| s.max_distance), Some(12.0));
        assert_eq!(script.ticks.len(), 2);
        assert_eq!(script.ticks[0].keys, vec![KeyCode::AltLeft, KeyCode::KeyW]);
        assert_eq!(script.ticks[0].buttons, vec![MouseButton::Left]);
        assert_eq!(script.ticks[1].repeat, 1);
        assert_eq!(script.tick_count(), 4);
    }

    #[test]
    fn rejects_unknown_key_names() {
        assert!(Script::parse("[[tick]]\nkeys = [\"Hyper\"]").is_err());
    }

    #[test]
    fn feed_replaces_held_state() {
        let mut input = InputState::new();
        input.update_key(KeyCode::KeyS, true);

        let tick = Tick {
            keys: vec![KeyCode::AltLeft],
            pointer: [3.0, 1.0],
            wheel: -1.0,
            ..Default::default()
        };
        tick.feed(&mut input);

        assert!(input.is_key_held(KeyCode::AltLeft));
        assert!(!input.is_key_held(KeyCode::KeyS));
        assert_eq!(input.pointer_delta(), Vec2::new(3.0, 1.0));
        assert_eq!(input.wheel_delta(), -1.0);
    }

    #[test]
    fn bundled_script_parses() {
        let script = Script::parse(include_str!("../scripts/orbit.toml")).unwrap();
        assert!(script.tick_count() > 0);
        assert!(script.settings.is_some());
    }
}
