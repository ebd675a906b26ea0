//! Rendering: the retained path model and rasterizer backends.

/// Backend trait, frame type, and backend factory.
pub mod backend;
/// CPU rasterizer powered by `vello_cpu`.
pub mod cpu;
/// Retained smooth paths and indexed vertex access.
pub mod path;
