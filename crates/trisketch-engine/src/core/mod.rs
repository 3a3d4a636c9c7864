//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! program: the `App` trait, the per-frame context, and the loop state
//! machine.

mod app;
mod ctx;
mod frame_loop;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
pub use frame_loop::{FrameLoop, LoopState, LoopStep};
