//! Assembly of the preset handed to the host framework.

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::debug;

use crate::{
    color::ColorError,
    css::css_variable_string,
    framework::{transform_tokens_to_framework_theme, FrameworkTheme},
    options::{Components, Options, OptionsError, PluginOptions},
    theme::css_variables_by_theme,
    tokens::css_variables_by_tokens,
};

/// Name the preset registers under.
pub const PRESET_NAME: &str = "preset-design";

/// Errors raised while building a preset in strict mode.
#[derive(Debug, Error)]
pub enum PresetError {
    /// Raised for invalid color literals.
    #[error(transparent)]
    Color(#[from] ColorError),
    /// Raised for dangling token references.
    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// Layer a preflight is injected into; tokens come before themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreflightLayer {
    /// Base token declarations.
    Tokens,
    /// Per-theme overrides.
    Themes,
}

type CssGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// A unit of CSS the host injects ahead of generated utilities.
///
/// The CSS is produced on demand by [`Preflight::css`].
#[derive(Clone)]
pub struct Preflight {
    layer: PreflightLayer,
    generate: CssGenerator,
}

impl Preflight {
    /// Creates a preflight for `layer` backed by a deferred generator.
    pub fn new<F>(layer: PreflightLayer, generate: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            layer,
            generate: Arc::new(generate),
        }
    }

    /// Layer the CSS belongs to.
    #[must_use]
    pub fn layer(&self) -> PreflightLayer {
        self.layer
    }

    /// Produces the CSS text.
    #[must_use]
    pub fn css(&self) -> String {
        (self.generate)()
    }
}

impl fmt::Debug for Preflight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preflight")
            .field("layer", &self.layer)
            .finish_non_exhaustive()
    }
}

/// Plugin descriptor consumed by the host framework.
#[derive(Debug, Clone)]
pub struct Preset {
    /// Preset name.
    pub name: &'static str,
    /// Theme object referencing the generated custom properties.
    pub theme: Option<FrameworkTheme>,
    /// CSS injections, `tokens` before `themes`.
    pub preflights: Vec<Preflight>,
    /// Component slots forwarded from the options.
    pub components: Components,
}

impl Preset {
    /// Returns the preflight of a layer, if one was emitted.
    #[must_use]
    pub fn preflight(&self, layer: PreflightLayer) -> Option<&Preflight> {
        self.preflights
            .iter()
            .find(|preflight| preflight.layer == layer)
    }

    /// Renders every preflight, separated by a blank line.
    #[must_use]
    pub fn css(&self) -> String {
        self.preflights
            .iter()
            .map(Preflight::css)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Resolves `user` and builds the preset.
pub fn preset_design(user: PluginOptions) -> Result<Preset, PresetError> {
    build_preset(&Options::resolve(user))
}

/// Builds the preset from resolved options.
///
/// With `strict_colors` set, invalid colors and unknown token references are
/// returned as errors; otherwise invalid colors are logged and degraded.
pub fn build_preset(options: &Options) -> Result<Preset, PresetError> {
    let strict = options.strict_colors;
    if strict {
        options.validate_references()?;
    }

    let tokens = css_variables_by_tokens(
        &options.tokens,
        &options.prefix,
        &options.color_palette_list,
        strict,
    )?;
    let theme = options
        .token_to_theme
        .then(|| transform_tokens_to_framework_theme(&tokens.configs));

    let mut preflights = Vec::new();

    let tokens_css = css_variable_string(&tokens.css_variables);
    if !tokens_css.is_empty() {
        let on_token_gen = Arc::clone(&options.on_token_gen);
        let css_variables = tokens.css_variables;
        preflights.push(Preflight::new(PreflightLayer::Tokens, move || {
            on_token_gen(&tokens_css, &css_variables)
        }));
    }

    let mut has_theme_css = false;
    let mut theme_blocks = Vec::with_capacity(options.themes.len());
    for (name, theme) in &options.themes {
        let css_variables = css_variables_by_theme(theme, &options.prefix, strict)?;
        let css = css_variable_string(&css_variables);
        has_theme_css |= !css.is_empty();
        theme_blocks.push((options.on_theme_gen)(
            name,
            &css,
            &css_variables,
            &options.themes,
        ));
    }

    if has_theme_css {
        let themes_css = theme_blocks.join("\n");
        preflights.push(Preflight::new(PreflightLayer::Themes, move || {
            themes_css.clone()
        }));
    }

    debug!(
        preflights = preflights.len(),
        themes = options.themes.len(),
        "built {PRESET_NAME}"
    );

    Ok(Preset {
        name: PRESET_NAME,
        theme,
        preflights,
        components: options.components.clone(),
    })
}
