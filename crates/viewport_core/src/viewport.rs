use glam::Vec2;

/// Area of the window the camera renders into, in physical pixels.
///
/// Only the size matters to camera controllers: drag distances are measured
/// relative to it so a full-width drag means the same rotation at any
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width and height as floats, each at least one pixel.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width.max(1) as f32, self.height.max(1) as f32)
    }
}
