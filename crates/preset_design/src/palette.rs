//! Tonal palettes generated from a single base color.

use serde::Serialize;

use crate::color::{parse_color, ColorError, Hsl, Rgba};

/// Shade numbers emitted for every palette, lightest first.
pub const SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Reference lightness (HSL percentage) of each entry in [`SHADES`].
const SHADE_LIGHTNESS: [f64; 11] = [
    97.0, 94.0, 86.0, 77.0, 66.0, 56.0, 47.0, 39.0, 32.0, 26.0, 16.0,
];

/// One generated shade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteShade {
    /// Position on the shade scale, e.g. `500`.
    pub number: u16,
    /// Lowercase hex color.
    pub hexcode: String,
}

/// Full shade scale for a named color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPalette {
    /// Name of the color the palette was generated for.
    pub name: String,
    /// Shade that carries the unmodified base color.
    pub main: PaletteShade,
    /// Every shade in [`SHADES`] order.
    pub palettes: Vec<PaletteShade>,
}

/// Generates the palette for `literal`.
///
/// The base color is pinned to the shade with the closest reference
/// lightness. The remaining shades keep its hue and saturation and follow the
/// reference curve, shifted by the base offset and fading back to the curve
/// towards both ends of the scale.
pub fn color_palette(literal: &str, name: &str) -> Result<ColorPalette, ColorError> {
    let base = parse_color(literal)?;
    let hsl = base.to_hsl();
    let anchor = nearest_shade(hsl.l);
    let offset = hsl.l - SHADE_LIGHTNESS[anchor];

    let palettes: Vec<PaletteShade> = SHADES
        .iter()
        .zip(SHADE_LIGHTNESS)
        .enumerate()
        .map(|(index, (&number, lightness))| {
            let hexcode = if index == anchor {
                base.to_hex()
            } else {
                let l = (lightness + offset * offset_weight(index, anchor)).clamp(0.0, 100.0);
                Rgba::from_hsl(Hsl { l, ..hsl }).to_hex()
            };
            PaletteShade { number, hexcode }
        })
        .collect();

    Ok(ColorPalette {
        name: name.to_owned(),
        main: palettes[anchor].clone(),
        palettes,
    })
}

fn nearest_shade(lightness: f64) -> usize {
    SHADE_LIGHTNESS
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - lightness).abs().total_cmp(&(*b - lightness).abs()))
        .map_or(0, |(index, _)| index)
}

#[allow(clippy::cast_precision_loss)]
fn offset_weight(index: usize, anchor: usize) -> f64 {
    let last = SHADES.len() - 1;
    if index < anchor {
        index as f64 / anchor as f64
    } else {
        (last - index) as f64 / (last - anchor) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightness(hex: &str) -> f64 {
        parse_color(hex).unwrap().to_hsl().l
    }

    #[test]
    fn palette_covers_the_full_shade_scale() {
        let palette = color_palette("rgb(100, 108, 255)", "primary").unwrap();
        let numbers: Vec<u16> = palette.palettes.iter().map(|shade| shade.number).collect();
        assert_eq!(numbers, SHADES);
        assert_eq!(palette.name, "primary");
        assert!(palette
            .palettes
            .iter()
            .all(|shade| shade.hexcode.starts_with('#') && shade.hexcode.len() == 7));
    }

    #[test]
    fn base_color_is_pinned_to_the_nearest_shade() {
        let palette = color_palette("rgb(100, 108, 255)", "primary").unwrap();
        assert_eq!(palette.main.number, 400);
        assert_eq!(palette.main.hexcode, "#646cff");
        assert!(palette.palettes.contains(&palette.main));
    }

    #[test]
    fn shades_darken_along_the_scale() {
        for base in ["#2563eb", "hsl(140, 60%, 92%)", "#0b1120", "#ffffff"] {
            let palette = color_palette(base, "base").unwrap();
            let first = lightness(&palette.palettes[0].hexcode);
            let last = lightness(&palette.palettes[10].hexcode);
            assert!(first > last, "{base}: 50 should be lighter than 950");
        }
    }

    #[test]
    fn palette_serializes_for_tooling() {
        let palette = color_palette("#646cff", "primary").unwrap();
        let json = serde_json::to_value(&palette).unwrap();
        assert_eq!(json["name"], "primary");
        assert_eq!(json["main"]["number"], 400);
        assert_eq!(json["main"]["hexcode"], "#646cff");
        assert_eq!(json["palettes"].as_array().unwrap().len(), SHADES.len());
    }

    #[test]
    fn invalid_base_is_an_error() {
        assert_eq!(
            color_palette("blurple", "primary"),
            Err(ColorError::Invalid("blurple".into()))
        );
    }
}
