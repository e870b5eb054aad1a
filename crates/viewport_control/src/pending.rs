/// Input gathered during a tick that has not been applied to the camera yet.
///
/// The controller adds to it while reading input and takes it with
/// [`consume`](Self::consume) when it updates the transform, which leaves
/// the idle state behind.  There is no other way to reset it, so a tick can
/// never apply the same input twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingInput {
    /// Azimuth change in radians.
    pub theta: f32,
    /// Polar angle change in radians.
    pub phi: f32,
    /// Multiplicative zoom; `1.0` means no zoom.  Below one moves closer.
    pub scale: f32,
    /// Additive distance change applied on top of `scale`.
    pub zoom_frag: f32,
}

impl Default for PendingInput {
    fn default() -> Self {
        Self::IDLE
    }
}

impl PendingInput {
    /// Nothing to apply.
    pub const IDLE: Self = Self {
        theta: 0.0,
        phi: 0.0,
        scale: 1.0,
        zoom_frag: 0.0,
    };

    pub fn rotate(&mut self, d_theta: f32, d_phi: f32) {
        self.theta += d_theta;
        self.phi += d_phi;
    }

    /// Move closer by one zoom step of size `factor` (< 1).
    pub fn zoom_in(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Move away by one zoom step of size `factor` (< 1).
    pub fn zoom_out(&mut self, factor: f32) {
        self.scale /= factor;
    }

    /// Change the distance by a fixed amount instead of a factor.
    pub fn dolly(&mut self, distance: f32) {
        self.zoom_frag += distance;
    }

    /// Distance change to apply to an orbit of `radius`.
    ///
    /// The scale part is proportional to the radius so a zoom step feels the
    /// same at any distance.
    pub fn zoom_fragment(&self, radius: f32) -> f32 {
        let scaled = if self.scale != 1.0 {
            radius * (self.scale - 1.0)
        } else {
            0.0
        };
        self.zoom_frag + scaled
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }

    /// Takes the pending input, leaving [`IDLE`](Self::IDLE) behind.
    pub fn consume(&mut self) -> Self {
        std::mem::take(self)
    }
}
