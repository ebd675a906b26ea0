//! Session-oriented driver: configuration, field, noise, and clock owned in one place.

/// Scene configuration (JSON).
pub mod config;
/// The tick loop.
pub mod wave_session;

pub use config::SceneConfig;
pub use wave_session::{RenderStats, WaveSession};
