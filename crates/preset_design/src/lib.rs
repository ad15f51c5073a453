#![doc = include_str!("../README.md")]
#![warn(clippy::pedantic, missing_docs, unreachable_pub)]

pub mod color;
pub mod config;
pub mod css;
pub mod framework;
pub mod naming;
pub mod options;
pub mod palette;
pub mod preset;
pub mod theme;
pub mod tokens;

pub use color::{color_value, is_valid_color, ColorError, ColorSpace, ColorValue};
pub use config::{ConfigError, ConfigStore};
pub use css::css_variable_string;
pub use framework::{transform_tokens_to_framework_theme, FrameworkTheme};
pub use options::{Components, Options, OptionsError, PluginOptions, Selectors};
pub use palette::{color_palette, ColorPalette, PaletteShade};
pub use preset::{build_preset, preset_design, Preflight, PreflightLayer, Preset, PresetError};
pub use theme::{css_variables_by_theme, MultiTheme, Theme, ThemeItem};
pub use tokens::{css_variables_by_tokens, CssVariableEntry, CssVariables, TokenCssVariables, TokenTree};
