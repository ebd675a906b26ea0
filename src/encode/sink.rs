use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{WavefieldError, WavefieldResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] when capture starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Capture framerate.
    pub fps: Fps,
}

/// Frame capture contract: start, capture one frame at a time, then stop and export.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, and
/// `end` is called exactly once after the last frame.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> WavefieldResult<()>;
    /// Push one frame in strictly increasing frame order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> WavefieldResult<()>;
    /// Stop capturing and export everything pushed so far.
    fn end(&mut self) -> WavefieldResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: u32,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// How many times `end` was called.
    pub fn end_count(&self) -> u32 {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> WavefieldResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> WavefieldResult<()> {
        if self.cfg.is_none() {
            return Err(WavefieldError::encode("in-memory sink not started"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> WavefieldResult<()> {
        self.ended += 1;
        Ok(())
    }
}

/// Reject frames that arrive out of order or with the wrong size.
pub(crate) fn check_frame(
    cfg: &SinkConfig,
    last_idx: Option<FrameIndex>,
    idx: FrameIndex,
    frame: &FrameRGBA,
) -> WavefieldResult<()> {
    if let Some(last) = last_idx
        && idx.0 <= last.0
    {
        return Err(WavefieldError::encode(
            "sink received out-of-order frame index",
        ));
    }
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(WavefieldError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    let expected = (cfg.width as usize)
        .saturating_mul(cfg.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(WavefieldError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

/// Composite premultiplied RGBA8 over an opaque straight-alpha background.
pub(crate) fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> WavefieldResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(WavefieldError::validation(
            "flatten_premul_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg_rgba[0]);
    let bg_g = u16::from(bg_rgba[1]);
    let bg_b = u16::from(bg_rgba[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        let r = u16::from(s[0]) + mul_div255_u16(bg_r, inv);
        let g = u16::from(s[1]) + mul_div255_u16(bg_g, inv);
        let b = u16::from(s[2]) + mul_div255_u16(bg_b, inv);

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}
