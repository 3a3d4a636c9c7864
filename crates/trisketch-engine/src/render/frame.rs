use std::ops::Range;

use crate::coords::{ColorRgba, Viewport};

/// One non-indexed draw over the bound vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub topology: wgpu::PrimitiveTopology,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

impl DrawCall {
    pub fn triangles(vertex_count: u32) -> Self {
        Self {
            topology: wgpu::PrimitiveTopology::TriangleList,
            first_vertex: 0,
            vertex_count,
        }
    }

    pub fn vertices(&self) -> Range<u32> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }
}

/// Work for one loop iteration: clear, then at most one draw, then present.
///
/// Independent of any GPU object, so the loop can be exercised headless.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FramePlan {
    pub viewport: Viewport,
    pub clear: ColorRgba,
    pub draw: Option<DrawCall>,
}

/// Result of handing a frame to a sink.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SubmitOutcome {
    Presented,
    /// Nothing was presented (minimized window, transient surface error).
    Skipped,
    /// The surface is unusable; the loop should close.
    Fatal,
}

/// Consumer of frame plans.
pub trait FrameSink {
    fn submit(&mut self, plan: &FramePlan) -> SubmitOutcome;
}

/// Sink that records every plan instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<FramePlan>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for RecordingSink {
    fn submit(&mut self, plan: &FramePlan) -> SubmitOutcome {
        self.frames.push(*plan);
        SubmitOutcome::Presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangles_draw_covers_requested_vertices() {
        let d = DrawCall::triangles(3);
        assert_eq!(d.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(d.vertices(), 0..3);
    }

    #[test]
    fn recording_sink_keeps_submission_order() {
        let mut sink = RecordingSink::new();
        let a = FramePlan {
            viewport: Viewport::full(1, 1),
            clear: ColorRgba::black(),
            draw: None,
        };
        let b = FramePlan {
            viewport: Viewport::full(2, 2),
            ..a
        };
        assert_eq!(sink.submit(&a), SubmitOutcome::Presented);
        sink.submit(&b);
        assert_eq!(sink.frames, vec![a, b]);
    }
}
