/// Rendering viewport in physical pixels.
///
/// Maps normalized device coordinates onto the framebuffer. After every
/// framebuffer resize it must be reset to cover the new size, otherwise the
/// scene is drawn stretched or clipped.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole `width` x `height` framebuffer.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamps the viewport to a render target of the given size.
    ///
    /// Returns `None` if nothing of the viewport lies inside the target.
    pub fn clamped_to(self, target_width: u32, target_height: u32) -> Option<Self> {
        let x = self.x.min(target_width);
        let y = self.y.min(target_height);
        let w = self.width.min(target_width - x);
        let h = self.height.min(target_height - y);
        let v = Self::new(x, y, w, h);
        if v.is_empty() { None } else { Some(v) }
    }

    /// Maps a point in normalized device coordinates to window pixels.
    ///
    /// NDC `(-1, -1)` is the bottom-left corner; the returned pixel position
    /// uses a top-left origin.
    pub fn ndc_to_pixel(self, ndc_x: f32, ndc_y: f32) -> (f32, f32) {
        let px = self.x as f32 + (ndc_x + 1.0) * 0.5 * self.width as f32;
        let py = self.y as f32 + (1.0 - ndc_y) * 0.5 * self.height as f32;
        (px, py)
    }
}
