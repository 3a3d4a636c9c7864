//! GPU rendering for the triangle program.
//!
//! Setup is one-shot: [`VertexBuffer::upload`], [`build_triangle_program`]
//! (compile + link), [`TrianglePipeline::new`]. Each loop iteration is
//! described by a [`FramePlan`] and handed to a [`FrameSink`]: the window's
//! [`GpuSink`] in the program, a [`RecordingSink`] in tests.

mod encode;
mod frame;
mod gpu_sink;
mod pipeline;
mod readback;
mod shader;
mod vertex;

pub use encode::{encode_plan, DrawBindings};
pub use frame::{DrawCall, FramePlan, FrameSink, RecordingSink, SubmitOutcome};
pub use gpu_sink::GpuSink;
pub use pipeline::TrianglePipeline;
pub use readback::ReadBackError;
pub use shader::{
    build_triangle_program, compile, link, CompiledStage, LinkedProgram, ShaderError, ShaderStage,
    FRAGMENT_SHADER_SOURCE, INFO_LOG_CAPACITY, VERTEX_SHADER_SOURCE,
};
pub use vertex::{Vertex, VertexBuffer, TRIANGLE_VERTICES};
