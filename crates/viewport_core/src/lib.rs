//! viewport_core: math and collaborator types for viewport camera control.
//!
//! - [`Spherical`] — Cartesian ↔ spherical conversion around an up axis.
//! - [`Transform`] / [`TransformSink`] — the transform a controller drives.
//! - [`InputState`] / [`InputSource`] — keyboard, mouse and wheel state.
//! - [`Viewport`] — pixel size used to normalise drags.

pub mod input;
pub mod spherical;
pub mod transform;
pub mod viewport;

pub use input::{InputSource, InputState, KeyCode, MouseButton};
pub use spherical::{Spherical, SphericalError, POLE_EPSILON};
pub use transform::{Transform, TransformSink};
pub use viewport::Viewport;

// re-export glam so callers don't need to pin their own version
pub use glam;
