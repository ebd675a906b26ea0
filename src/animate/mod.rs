//! Per-frame animation: the frame clock and the noise-driven vertex update.

/// Frame counter and its `NotStarted -> Running -> Stopped` state machine.
pub mod clock;
/// Recompute live vertex positions for a frame.
pub mod update;

pub use clock::{AnimationClock, ClockState, Transition};
pub use update::{animate_path, apply_frame, live_y};
