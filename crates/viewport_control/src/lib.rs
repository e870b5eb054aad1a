//! viewport_control: an orbit camera controller for editor-style viewports.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use viewport_control::{OrbitController, OrbitSettings};
//! use viewport_core::{InputState, Transform, Viewport};
//! use glam::Vec3;
//!
//! let mut controller = OrbitController::new(OrbitSettings::default());
//! let mut camera = Transform::looking_at(Vec3::new(0.0, 2.0, 8.0), Vec3::ZERO, Vec3::Y);
//! let mut input = InputState::new();
//!
//! // once per frame, after the window events have been fed into `input`
//! controller.update(&input, &mut camera, Viewport::new(1280, 720));
//! input.end_frame();
//! ```
//!
//! Default bindings: hold left Alt, then drag with the left button to orbit,
//! W/S/A/D/Q/E to pan.  The wheel zooms without a modifier.

pub mod bindings;
pub mod controller;
pub mod error;
pub mod pending;
pub mod settings;

pub use bindings::{ControlBindings, PAN_STEP};
pub use controller::{OrbitController, ZOOM_STEP};
pub use error::OrbitError;
pub use pending::PendingInput;
pub use settings::{OrbitSettings, MIN_DISTANCE_FLOOR};
