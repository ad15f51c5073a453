//! Parsing and normalization of CSS color literals.
//!
//! Token colors are stored in CSS variables as bare component lists
//! (`100, 108, 255` or `223, 86%, 89%`) so that utility classes can wrap them
//! in `rgb(...)`/`hsl(...)` and apply their own opacity.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::error;

/// Error returned when a color literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Raised when the literal is not a supported CSS color.
    #[error("invalid color: {0}")]
    Invalid(String),
}

/// Color space a normalized value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Three `0..=255` channels.
    Rgb,
    /// Hue in degrees followed by saturation and lightness percentages.
    Hsl,
}

impl ColorSpace {
    /// CSS function name for the color space.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Hsl => "hsl",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color with unrounded channels in `0..=255` and alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

/// Hue in `0..360`, saturation and lightness in `0..=100`, alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation percentage.
    pub s: f64,
    /// Lightness percentage.
    pub l: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Opaque black, also used as the fallback for unparsable literals.
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Returns the channels rounded to the nearest integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|channel| channel.round().clamp(0.0, 255.0) as u8)
    }

    /// Converts the color to HSL without rounding.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
                a: self.a,
            };
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl {
            h: h * 60.0,
            s: s * 100.0,
            l: l * 100.0,
            a: self.a,
        }
    }

    /// Builds a color from HSL components.
    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.h.rem_euclid(360.0) / 360.0;
        let s = (hsl.s / 100.0).clamp(0.0, 1.0);
        let l = (hsl.l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            let gray = l * 255.0;
            return Rgba {
                r: gray,
                g: gray,
                b: gray,
                a: hsl.a,
            };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgba {
            r: hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
            g: hue_to_channel(p, q, h) * 255.0,
            b: hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
            a: hsl.a,
        }
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` for translucent colors.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        if self.a < 1.0 {
            let a = (self.a * 255.0).round().clamp(0.0, 255.0) as u8;
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}")
        }
    }
}

impl Hsl {
    /// Returns `[h, s, l]` rounded to integers with the hue kept below 360.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded(self) -> [i64; 3] {
        let h = self.h.round() as i64 % 360;
        [h, self.s.round() as i64, self.l.round() as i64]
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parses a hex, `rgb()`/`rgba()` or `hsl()`/`hsla()` literal.
pub fn parse_color(literal: &str) -> Result<Rgba, ColorError> {
    parse(literal).ok_or_else(|| ColorError::Invalid(literal.to_owned()))
}

fn parse(literal: &str) -> Option<Rgba> {
    let literal = literal.trim();
    if let Some(hex) = literal.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = literal.to_ascii_lowercase();
    let open = lower.find('(')?;
    let body = lower[open + 1..].strip_suffix(')')?;
    match lower[..open].trim_end() {
        "rgb" | "rgba" => parse_rgb(body),
        "hsl" | "hsla" => parse_hsl(body),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let (width, count) = match hex.len() {
        3 => (1, 3),
        4 => (1, 4),
        6 => (2, 3),
        8 => (2, 4),
        _ => return None,
    };

    let mut channels = [0.0, 0.0, 0.0, 255.0];
    for (index, channel) in channels.iter_mut().enumerate().take(count) {
        let value = u8::from_str_radix(&hex[index * width..(index + 1) * width], 16).ok()?;
        *channel = if width == 1 {
            f64::from(value * 17)
        } else {
            f64::from(value)
        };
    }

    let [r, g, b, a] = channels;
    Some(Rgba {
        r,
        g,
        b,
        a: a / 255.0,
    })
}

fn parse_rgb(body: &str) -> Option<Rgba> {
    let ([r, g, b], alpha) = split_arguments(body)?;
    Some(Rgba {
        r: parse_channel(r)?,
        g: parse_channel(g)?,
        b: parse_channel(b)?,
        a: alpha.map_or(Some(1.0), parse_alpha)?,
    })
}

fn parse_hsl(body: &str) -> Option<Rgba> {
    let ([h, s, l], alpha) = split_arguments(body)?;
    Some(Rgba::from_hsl(Hsl {
        h: parse_hue(h)?,
        s: parse_percentage(s)?,
        l: parse_percentage(l)?,
        a: alpha.map_or(Some(1.0), parse_alpha)?,
    }))
}

/// Splits either `a, b, c[, alpha]` or `a b c[ / alpha]`.
fn split_arguments(body: &str) -> Option<([&str; 3], Option<&str>)> {
    if body.contains(',') {
        if body.contains('/') {
            return None;
        }
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        return match parts.as_slice() {
            [a, b, c] => Some(([*a, *b, *c], None)),
            [a, b, c, alpha] => Some(([*a, *b, *c], Some(*alpha))),
            _ => None,
        };
    }

    let (channels, alpha) = match body.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (body, None),
    };
    match channels.split_whitespace().collect::<Vec<_>>().as_slice() {
        [a, b, c] => Some(([*a, *b, *c], alpha)),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_channel(raw: &str) -> Option<f64> {
    let value = match raw.strip_suffix('%') {
        Some(percent) => parse_number(percent)? * 2.55,
        None => parse_number(raw)?,
    };
    Some(value.clamp(0.0, 255.0))
}

fn parse_alpha(raw: &str) -> Option<f64> {
    let value = match raw.strip_suffix('%') {
        Some(percent) => parse_number(percent)? / 100.0,
        None => parse_number(raw)?,
    };
    Some(value.clamp(0.0, 1.0))
}

fn parse_percentage(raw: &str) -> Option<f64> {
    Some(parse_number(raw.strip_suffix('%')?)?.clamp(0.0, 100.0))
}

fn parse_hue(raw: &str) -> Option<f64> {
    let degrees = if let Some(value) = raw.strip_suffix("deg") {
        parse_number(value)?
    } else if let Some(value) = raw.strip_suffix("grad") {
        parse_number(value)? * 0.9
    } else if let Some(value) = raw.strip_suffix("rad") {
        parse_number(value)?.to_degrees()
    } else if let Some(value) = raw.strip_suffix("turn") {
        parse_number(value)? * 360.0
    } else {
        parse_number(raw)?
    };
    Some(degrees.rem_euclid(360.0))
}

/// Checks a literal, logging or returning the failure depending on `strict`.
pub fn is_valid_color(literal: &str, strict: bool) -> Result<bool, ColorError> {
    match parse_color(literal) {
        Ok(_) => Ok(true),
        Err(err) => report_invalid(err, strict).map(|()| false),
    }
}

fn report_invalid(err: ColorError, strict: bool) -> Result<(), ColorError> {
    if strict {
        return Err(err);
    }
    let ColorError::Invalid(literal) = &err;
    error!("Invalid color : {literal}");
    Ok(())
}

/// A color literal reduced to the component list stored in a CSS variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorValue {
    /// Comma separated components, e.g. `100, 108, 255`.
    pub value: String,
    /// Space the components are expressed in.
    pub space: ColorSpace,
}

/// Normalizes a literal into its component list.
///
/// Literals starting with `hsl` keep the HSL space, everything else is
/// expressed as RGB. In non-strict mode an invalid literal is reported through
/// `tracing` and normalized as black.
pub fn color_value(literal: &str, strict: bool) -> Result<ColorValue, ColorError> {
    let rgba = match parse_color(literal) {
        Ok(rgba) => rgba,
        Err(err) => {
            report_invalid(err, strict)?;
            Rgba::BLACK
        }
    };

    let is_hsl = literal
        .trim_start()
        .get(..3)
        .is_some_and(|head| head.eq_ignore_ascii_case("hsl"));

    if is_hsl {
        let [h, s, l] = rgba.to_hsl().rounded();
        Ok(ColorValue {
            value: format!("{h}, {s}%, {l}%"),
            space: ColorSpace::Hsl,
        })
    } else {
        let [r, g, b] = rgba.to_rgb8();
        Ok(ColorValue {
            value: format!("{r}, {g}, {b}"),
            space: ColorSpace::Rgb,
        })
    }
}
