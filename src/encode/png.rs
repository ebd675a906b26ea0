use crate::encode::sink::{
    FrameSink, SinkConfig, check_frame, flatten_premul_over_bg_to_opaque_rgba8,
};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{WavefieldError, WavefieldResult};
use crate::render::backend::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Options for [`PngSequenceSink`].
#[derive(Clone, Debug)]
pub struct PngSequenceOpts {
    /// Directory the numbered frames are written into.
    pub out_dir: PathBuf,
    /// File name prefix, followed by a zero-padded frame index.
    pub prefix: String,
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
}

impl PngSequenceOpts {
    /// Write `frame_000000.png`, `frame_000001.png`, ... into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            prefix: "frame_".to_owned(),
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

/// Sink that writes every captured frame as an opaque PNG.
pub struct PngSequenceSink {
    opts: PngSequenceOpts,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    scratch: Vec<u8>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink writing into `opts.out_dir`.
    pub fn new(opts: PngSequenceOpts) -> Self {
        Self {
            opts,
            cfg: None,
            last_idx: None,
            scratch: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path a given frame is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        frame_path(&self.opts.out_dir, &self.opts.prefix, idx)
    }
}

fn frame_path(dir: &Path, prefix: &str, idx: FrameIndex) -> PathBuf {
    dir.join(format!("{prefix}{:06}.png", idx.0))
}

impl FrameSink for PngSequenceSink {
    #[tracing::instrument(skip(self), fields(out_dir = %self.opts.out_dir.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> WavefieldResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(WavefieldError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.opts.out_dir).with_context(|| {
            format!(
                "failed to create output directory '{}'",
                self.opts.out_dir.display()
            )
        })?;
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> WavefieldResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| WavefieldError::encode("png sink not started"))?;
        check_frame(cfg, self.last_idx, idx, frame)?;
        self.last_idx = Some(idx);

        if frame.premultiplied {
            flatten_premul_over_bg_to_opaque_rgba8(&mut self.scratch, &frame.data, self.opts.bg_rgba)?;
        } else {
            self.scratch.copy_from_slice(&frame.data);
        }

        let path = frame_path(&self.opts.out_dir, &self.opts.prefix, idx);
        image::save_buffer_with_format(
            &path,
            &self.scratch,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> WavefieldResult<()> {
        if self.cfg.take().is_none() {
            return Err(WavefieldError::encode("png sink not started"));
        }
        tracing::info!(
            frames = self.written.len(),
            out_dir = %self.opts.out_dir.display(),
            "png sequence exported"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Fps;

    #[test]
    fn frame_names_are_zero_padded() {
        let sink = PngSequenceSink::new(PngSequenceOpts::new("out"));
        assert_eq!(
            sink.frame_path(FrameIndex(42)),
            PathBuf::from("out").join("frame_000042.png")
        );
    }

    #[test]
    fn writes_flattened_pngs() {
        let dir = std::env::temp_dir().join(format!("wavefield_png_sink_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let mut opts = PngSequenceOpts::new(&dir);
        opts.bg_rgba = [10, 20, 30, 255];
        let mut sink = PngSequenceSink::new(opts);
        sink.begin(SinkConfig {
            width: 2,
            height: 1,
            fps: Fps::new(60, 1).unwrap(),
        })
        .unwrap();
        let frame = FrameRGBA {
            width: 2,
            height: 1,
            data: vec![0, 0, 0, 0, 200, 100, 50, 255],
            premultiplied: true,
        };
        sink.push_frame(FrameIndex(0), &frame).unwrap();
        sink.push_frame(FrameIndex(1), &frame).unwrap();
        assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
        sink.end().unwrap();
        assert!(sink.end().is_err());

        assert_eq!(sink.written().len(), 2);
        let img = image::open(&sink.written()[0]).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [200, 100, 50, 255]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
