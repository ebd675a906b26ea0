use crate::animate::clock::{AnimationClock, ClockState, Transition};
use crate::animate::update::apply_frame;
use crate::encode::sink::FrameSink;
use crate::field::build::{WaveField, build_field};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{WavefieldError, WavefieldResult};
use crate::noise::{FieldNoise, NoiseSource, Simplex};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::session::config::SceneConfig;

/// Counters for a finished [`WaveSession::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames rendered and handed to the sink.
    pub frames_rendered: u64,
    /// Index of the last captured frame.
    pub last_frame: u64,
}

/// A recording session: one field, its noise, and the clock that drives it.
///
/// Each [`WaveSession::tick`] updates the field for the current frame, renders it, hands the
/// pixels to the sink and advances the clock. The sink is started on the first tick and
/// finalized on the tick that produces the terminal frame; after that the session refuses to
/// tick.
pub struct WaveSession<N: NoiseSource = Simplex> {
    cfg: SceneConfig,
    noise: FieldNoise<N>,
    field: WaveField,
    clock: AnimationClock,
}

impl WaveSession<Simplex> {
    /// Build a session with simplex noise seeded from `cfg.seed`.
    pub fn new(cfg: SceneConfig) -> WavefieldResult<Self> {
        let noise = FieldNoise::seeded(cfg.seed);
        Self::with_noise(cfg, noise)
    }
}

impl<N: NoiseSource> WaveSession<N> {
    /// Build a session with caller-provided noise sources.
    pub fn with_noise(cfg: SceneConfig, noise: FieldNoise<N>) -> WavefieldResult<Self> {
        cfg.validate()?;
        let field = build_field(&cfg.field, &cfg.palette, cfg.canvas, &noise)?;
        let clock = AnimationClock::new(cfg.terminal());
        Ok(Self {
            cfg,
            noise,
            field,
            clock,
        })
    }

    /// Scene configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    /// Current field geometry.
    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Frame clock.
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Move the field to `frame` without touching the clock or any sink.
    pub fn seek(&mut self, frame: FrameIndex) -> WavefieldResult<()> {
        apply_frame(&mut self.field, frame, &self.noise.drift, &self.cfg.field)
    }

    /// Render a single frame out of band, e.g. for a preview still.
    pub fn render_frame(
        &mut self,
        frame: FrameIndex,
        backend: &mut dyn RenderBackend,
    ) -> WavefieldResult<FrameRGBA> {
        self.seek(frame)?;
        backend.render_field(&self.field)
    }

    /// Produce one frame and advance the clock.
    pub fn tick(
        &mut self,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> WavefieldResult<ClockState> {
        match self.clock.state() {
            ClockState::NotStarted => {
                sink.begin(self.cfg.sink_config())?;
                self.clock.start()?;
            }
            ClockState::Running => {}
            ClockState::Stopped => {
                return Err(WavefieldError::validation(
                    "session already reached its terminal frame",
                ));
            }
        }

        let frame = self.clock.frame();
        self.seek(frame)?;
        let pixels = backend.render_field(&self.field)?;
        sink.push_frame(frame, &pixels)?;

        match self.clock.advance()? {
            Transition::Next(next) => {
                tracing::debug!(frame = frame.0, next = next.0, "frame captured");
            }
            Transition::Stopped(last) => {
                sink.end()?;
                tracing::info!(terminal = last.0, "terminal frame reached, capture exported");
            }
        }
        Ok(self.clock.state())
    }

    /// Tick until the terminal frame has been captured and exported.
    #[tracing::instrument(skip_all, fields(terminal = self.cfg.terminal_frame))]
    pub fn run(
        &mut self,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> WavefieldResult<RenderStats> {
        let mut stats = RenderStats::default();
        loop {
            let frame = self.clock.frame();
            let state = self.tick(backend, sink)?;
            stats.frames_rendered += 1;
            stats.last_frame = frame.0;
            if state == ClockState::Stopped {
                return Ok(stats);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/wave_session.rs"]
mod tests;
