use crate::color::ColorDef;
use crate::encode::sink::SinkConfig;
use crate::field::config::{FieldConfig, Palette};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{WavefieldError, WavefieldResult};
use crate::render::backend::RenderSettings;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to build and record one wave-field session.
///
/// Every key is optional in JSON; missing keys take the reference values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Drawing surface.
    pub canvas: Canvas,
    /// Capture framerate.
    pub fps: Fps,
    /// Seed for both noise sources.
    pub seed: u64,
    /// Last frame captured before export.
    pub terminal_frame: u64,
    /// Clear color behind the field.
    pub background: ColorDef,
    /// Field geometry.
    pub field: FieldConfig,
    /// Band colors.
    pub palette: Palette,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            fps: Fps { num: 60, den: 1 },
            seed: 7,
            terminal_frame: 360,
            background: ColorDef::from_rgb8(0, 0, 0),
            field: FieldConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl SceneConfig {
    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> WavefieldResult<Self> {
        serde_json::from_str(s).map_err(|e| WavefieldError::serde(e.to_string()))
    }

    /// Read and parse a JSON file.
    pub fn load(path: &Path) -> WavefieldResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> WavefieldResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WavefieldError::serde(e.to_string()))
    }

    /// Check every section.
    pub fn validate(&self) -> WavefieldResult<()> {
        self.canvas.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        self.field.validate()?;
        self.palette.validate()
    }

    /// The terminal frame as an index.
    pub fn terminal(&self) -> FrameIndex {
        FrameIndex(self.terminal_frame)
    }

    /// Backend settings for this scene.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            clear_rgba: Some(self.background.to_rgba8()),
        }
    }

    /// Sink settings for this scene.
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.fps,
        }
    }
}
