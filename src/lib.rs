//! wavefield renders an animated field of noise-driven wave ribbons to a frame sequence.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `FieldConfig + Palette + Canvas + FieldNoise -> WaveField` (once per session)
//! 2. **Animate**: `WaveField + FrameIndex -> WaveField` (only interior vertical coordinates move)
//! 3. **Render**: `WaveField -> FrameRGBA` (CPU backend on `vello_cpu`)
//! 4. **Capture**: frames stream into a [`FrameSink`] (numbered PNG sequence or memory)
//!
//! [`WaveSession`] owns the field, its noise and the [`AnimationClock`] and drives the steps above
//! one tick at a time until the terminal frame has been captured and exported.
#![forbid(unsafe_code)]

mod foundation;

/// Frame clock and per-frame vertex update.
pub mod animate;
/// Colors and gradients.
pub mod color;
/// Frame capture sinks.
pub mod encode;
/// Field configuration and construction.
pub mod field;
/// Seeded coherent noise.
pub mod noise;
/// Path model and rasterizer backends.
pub mod render;
/// Session driver and scene configuration.
pub mod session;

pub use crate::animate::{AnimationClock, ClockState, Transition, apply_frame, live_y};
pub use crate::color::{ColorDef, Gradient};
pub use crate::encode::ensure_parent_dir;
pub use crate::encode::png::{PngSequenceOpts, PngSequenceSink};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::field::{ControlPoint, FieldConfig, Palette, WaveField, WavePath, build_field};
pub use crate::foundation::core::{BezPath, Canvas, Fps, FrameIndex, Point, Vec2};
pub use crate::foundation::error::{WavefieldError, WavefieldResult};
pub use crate::noise::{FieldNoise, NoiseSource, Simplex};
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::path::{Segment, SmoothPath, VertexAccess};
pub use crate::session::{RenderStats, SceneConfig, WaveSession};
