//! Colors and gradients used to paint the field.

use crate::foundation::error::{WavefieldError, WavefieldResult};
use crate::foundation::math::lerp;
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color with normalized `0..1` channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDef {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl ColorDef {
    /// Build a color from normalized channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(s: &str) -> WavefieldResult<Self> {
        parse_hex(s).map_err(WavefieldError::validation)
    }

    /// Straight-alpha 8-bit channels, rounded.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Snap every channel to the nearest 8-bit step.
    pub fn quantized(self) -> Self {
        let [r, g, b, a] = self.to_rgba8();
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    fn mix(self, other: Self, t: f64) -> Self {
        Self::rgba(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
            lerp(self.a, other.a, t),
        )
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    // Short forms repeat each nibble: `#F46` == `#FF4466`.
    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    let (r, g, b, a) = match s.len() {
        3 | 4 => {
            let r = hex_nibble(&s[0..1])?;
            let g = hex_nibble(&s[1..2])?;
            let b = hex_nibble(&s[2..3])?;
            let a = if s.len() == 4 {
                hex_nibble(&s[3..4])?
            } else {
                255
            };
            (r, g, b, a)
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 {
                hex_byte(&s[6..8])?
            } else {
                255
            };
            (r, g, b, a)
        }
        _ => {
            return Err(
                "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA (case-insensitive)"
                    .to_owned(),
            );
        }
    };

    Ok(ColorDef::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

/// Evenly spaced color stops interpolated linearly in sRGB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gradient {
    stops: Vec<ColorDef>,
}

impl Gradient {
    /// Build a gradient; at least two stops are required.
    pub fn new(stops: Vec<ColorDef>) -> WavefieldResult<Self> {
        let g = Self { stops };
        g.validate()?;
        Ok(g)
    }

    /// Two-stop gradient from `from` to `to`.
    pub fn linear(from: ColorDef, to: ColorDef) -> Self {
        Self {
            stops: vec![from, to],
        }
    }

    /// Build a gradient from hex strings.
    pub fn from_hex<'a>(stops: impl IntoIterator<Item = &'a str>) -> WavefieldResult<Self> {
        let stops = stops
            .into_iter()
            .map(ColorDef::from_hex)
            .collect::<WavefieldResult<Vec<_>>>()?;
        Self::new(stops)
    }

    /// Reject gradients with fewer than two stops.
    pub fn validate(&self) -> WavefieldResult<()> {
        if self.stops.len() < 2 {
            return Err(WavefieldError::validation(
                "gradient needs at least two color stops",
            ));
        }
        Ok(())
    }

    /// The color stops.
    pub fn stops(&self) -> &[ColorDef] {
        &self.stops
    }

    /// Sample at `t` (clamped to `[0, 1]`), rounded to 8-bit channels.
    pub fn sample(&self, t: f64) -> ColorDef {
        match self.stops.as_slice() {
            [] => ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
            [only] => only.quantized(),
            stops => {
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
                let segments = (stops.len() - 1) as f64;
                let pos = t * segments;
                let idx = (pos.floor() as usize).min(stops.len() - 2);
                let local = pos - idx as f64;
                stops[idx].mix(stops[idx + 1], local).quantized()
            }
        }
    }
}
