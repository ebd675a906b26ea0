//! Wave-field geometry: configuration and one-time construction.

/// Construction of the field's paths and control points.
pub mod build;
/// Tunables for the field's shape and paint.
pub mod config;

pub use build::{ControlPoint, WaveField, WavePath, build_field};
pub use config::{FieldConfig, Palette};
