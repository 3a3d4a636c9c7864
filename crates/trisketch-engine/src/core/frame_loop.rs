use crate::input::{InputState, Key};

/// Render loop state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Closing,
}

/// What the runtime should do for the current poll cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopStep {
    /// Draw and present one frame.
    Render { frame_index: u64 },
    /// Stop the loop; no frame this cycle.
    Exit,
}

/// Close-flag bookkeeping for the render loop.
///
/// The flag is only checked at the top of an iteration. A close key seen
/// during input processing still lets that iteration's frame through, so
/// the loop ends exactly one poll cycle after the key is observed.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    close_key: Key,
    frame_index: u64,
}

impl FrameLoop {
    pub fn new(close_key: Key) -> Self {
        Self {
            state: LoopState::Running,
            close_key,
            frame_index: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of iterations that rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frame_index
    }

    /// Sets the close flag (window manager close, fatal surface state).
    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("close requested after {} frames", self.frame_index);
        }
        self.state = LoopState::Closing;
    }

    /// Starts one iteration: close check, then input processing.
    pub fn begin_iteration(&mut self, input: &InputState) -> LoopStep {
        if self.state == LoopState::Closing {
            return LoopStep::Exit;
        }

        if input.key_down(self.close_key) {
            log::info!("{} pressed; closing", self.close_key);
            self.request_close();
        }

        let frame_index = self.frame_index;
        self.frame_index += 1;
        LoopStep::Render { frame_index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, KeyState};

    fn pressed(key: Key) -> InputState {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::key(key, KeyState::Pressed));
        s
    }

    #[test]
    fn runs_until_close_key() {
        let mut lp = FrameLoop::new(Key::CapsLock);
        let idle = InputState::default();
        for i in 0..5 {
            assert_eq!(lp.begin_iteration(&idle), LoopStep::Render { frame_index: i });
        }
        assert_eq!(lp.state(), LoopState::Running);
    }

    #[test]
    fn exits_one_cycle_after_close_key_is_observed() {
        let mut lp = FrameLoop::new(Key::CapsLock);
        let down = pressed(Key::CapsLock);

        // The observing iteration still renders.
        assert_eq!(lp.begin_iteration(&down), LoopStep::Render { frame_index: 0 });
        assert_eq!(lp.state(), LoopState::Closing);

        assert_eq!(lp.begin_iteration(&down), LoopStep::Exit);
        assert_eq!(lp.frames_rendered(), 1);
    }

    #[test]
    fn releasing_the_key_does_not_cancel_close() {
        let mut lp = FrameLoop::new(Key::CapsLock);
        lp.begin_iteration(&pressed(Key::CapsLock));
        assert_eq!(lp.begin_iteration(&InputState::default()), LoopStep::Exit);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut lp = FrameLoop::new(Key::CapsLock);
        let down = pressed(Key::Escape);
        assert!(matches!(lp.begin_iteration(&down), LoopStep::Render { .. }));
        assert!(matches!(lp.begin_iteration(&down), LoopStep::Render { .. }));
    }

    #[test]
    fn window_close_exits_without_another_frame() {
        let mut lp = FrameLoop::new(Key::CapsLock);
        lp.begin_iteration(&InputState::default());
        lp.request_close();
        assert_eq!(lp.begin_iteration(&InputState::default()), LoopStep::Exit);
        assert_eq!(lp.frames_rendered(), 1);
    }
}
