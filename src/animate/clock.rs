use crate::foundation::core::FrameIndex;
use crate::foundation::error::{WavefieldError, WavefieldResult};

/// Lifecycle of an [`AnimationClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    /// Created, no frame produced yet.
    NotStarted,
    /// Producing frames.
    Running,
    /// Terminal frame reached; capture is finalized.
    Stopped,
}

/// Result of [`AnimationClock::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The clock moved on to this frame.
    Next(FrameIndex),
    /// The terminal frame was the one just produced; the clock is now stopped.
    Stopped(FrameIndex),
}

/// Monotonic frame counter with a terminal frame.
///
/// Frames `0..=terminal` are produced; the terminal transition is reported exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationClock {
    frame: FrameIndex,
    terminal: FrameIndex,
    state: ClockState,
}

impl AnimationClock {
    /// A clock that stops after producing `terminal`.
    pub fn new(terminal: FrameIndex) -> Self {
        Self {
            frame: FrameIndex(0),
            terminal,
            state: ClockState::NotStarted,
        }
    }

    /// The frame currently being produced.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// The last frame that will be produced.
    pub fn terminal(&self) -> FrameIndex {
        self.terminal
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// `NotStarted -> Running`.
    pub fn start(&mut self) -> WavefieldResult<()> {
        if self.state != ClockState::NotStarted {
            return Err(WavefieldError::validation(format!(
                "clock cannot start from {:?}",
                self.state
            )));
        }
        self.state = ClockState::Running;
        Ok(())
    }

    /// Finish the current frame: step to the next one, or stop at the terminal frame.
    pub fn advance(&mut self) -> WavefieldResult<Transition> {
        if self.state != ClockState::Running {
            return Err(WavefieldError::validation(format!(
                "clock cannot advance from {:?}",
                self.state
            )));
        }
        if self.frame >= self.terminal {
            self.state = ClockState::Stopped;
            return Ok(Transition::Stopped(self.frame));
        }
        self.frame = FrameIndex(self.frame.0 + 1);
        Ok(Transition::Next(self.frame))
    }
}
