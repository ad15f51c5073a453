//! User options and their resolution against the defaults.

use std::{collections::HashSet, fmt, sync::Arc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    css::{default_theme_css, default_token_css, theme_selector, wrap_in_selector},
    naming::camel_to_kebab,
    palette::SHADES,
    theme::MultiTheme,
    tokens::{CssVariables, TokenTree, COLORS},
};

/// Prefix used for custom properties when none is configured.
pub const DEFAULT_PREFIX: &str = "soy";

/// Renders the token block from `(css, variables)`.
pub type TokenGenHook = Arc<dyn Fn(&str, &CssVariables) -> String + Send + Sync>;

/// Renders one theme block from `(theme name, css, variables, all themes)`.
pub type ThemeGenHook = Arc<dyn Fn(&str, &str, &CssVariables, &MultiTheme) -> String + Send + Sync>;

/// Component slots keyed by component name; values are token references.
pub type Components = IndexMap<String, IndexMap<String, String>>;

/// Errors raised while validating resolved options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// A theme or component points at a token that does not exist.
    #[error("unknown token reference '{reference}' in {scope}")]
    UnknownTokenReference {
        /// Dotted path of the offending slot.
        scope: String,
        /// The reference as written.
        reference: String,
    },
}

/// Selector templates used when no generation hook is supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Selectors {
    /// Selector wrapping the token block, `:root` by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<String>,
    /// Selector template for themes; `{theme}` is replaced by the theme name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<String>,
}

/// Options as supplied by the user. Every field falls back to a default.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginOptions {
    /// Prefix of every custom property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Token tree to flatten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenTree>,
    /// Named themes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<MultiTheme>,
    /// Component slots, forwarded to the host untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// Whether to project the tokens into a framework theme object.
    #[serde(
        default,
        alias = "tokenToUnoTheme",
        skip_serializing_if = "Option::is_none"
    )]
    pub token_to_theme: Option<bool>,
    /// Color items that get a generated shade palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palette_list: Option<Vec<String>>,
    /// Fail on invalid colors and unknown references instead of logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_colors: Option<bool>,
    /// Selector templates for file based configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Selectors>,
    /// Custom token block renderer.
    #[serde(skip)]
    pub on_token_gen: Option<TokenGenHook>,
    /// Custom theme block renderer.
    #[serde(skip)]
    pub on_theme_gen: Option<ThemeGenHook>,
}

impl fmt::Debug for PluginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginOptions")
            .field("prefix", &self.prefix)
            .field("tokens", &self.tokens)
            .field("themes", &self.themes)
            .field("components", &self.components)
            .field("token_to_theme", &self.token_to_theme)
            .field("color_palette_list", &self.color_palette_list)
            .field("strict_colors", &self.strict_colors)
            .field("selectors", &self.selectors)
            .field("on_token_gen", &self.on_token_gen.is_some())
            .field("on_theme_gen", &self.on_theme_gen.is_some())
            .finish()
    }
}

impl PluginOptions {
    /// Sets the custom property prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the token tree.
    #[must_use]
    pub fn with_tokens(mut self, tokens: TokenTree) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Sets the themes.
    #[must_use]
    pub fn with_themes(mut self, themes: MultiTheme) -> Self {
        self.themes = Some(themes);
        self
    }

    /// Sets the color items expanded into palettes.
    #[must_use]
    pub fn with_color_palettes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color_palette_list = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the token block renderer.
    #[must_use]
    pub fn on_token_gen<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &CssVariables) -> String + Send + Sync + 'static,
    {
        self.on_token_gen = Some(Arc::new(hook));
        self
    }

    /// Overrides the theme block renderer.
    #[must_use]
    pub fn on_theme_gen<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &str, &CssVariables, &MultiTheme) -> String + Send + Sync + 'static,
    {
        self.on_theme_gen = Some(Arc::new(hook));
        self
    }
}

/// Fully resolved options.
#[derive(Clone)]
pub struct Options {
    /// Prefix of every custom property.
    pub prefix: String,
    /// Token tree to flatten.
    pub tokens: TokenTree,
    /// Named themes.
    pub themes: MultiTheme,
    /// Component slots, forwarded to the host untouched.
    pub components: Components,
    /// Whether the preset carries a framework theme object.
    pub token_to_theme: bool,
    /// Color items that get a generated shade palette.
    pub color_palette_list: Vec<String>,
    /// Fail instead of logging on invalid input.
    pub strict_colors: bool,
    /// Token block renderer.
    pub on_token_gen: TokenGenHook,
    /// Theme block renderer.
    pub on_theme_gen: ThemeGenHook,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("prefix", &self.prefix)
            .field("tokens", &self.tokens)
            .field("themes", &self.themes)
            .field("components", &self.components)
            .field("token_to_theme", &self.token_to_theme)
            .field("color_palette_list", &self.color_palette_list)
            .field("strict_colors", &self.strict_colors)
            .finish_non_exhaustive()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::resolve(PluginOptions::default())
    }
}

impl Options {
    /// Merges user options over the defaults.
    ///
    /// Explicit hooks take precedence over selector templates, which take
    /// precedence over the built-in `:root` / `html[data-theme]` wrappers.
    #[must_use]
    pub fn resolve(user: PluginOptions) -> Self {
        let selectors = user.selectors.unwrap_or_default();

        let on_token_gen: TokenGenHook = match (user.on_token_gen, selectors.tokens) {
            (Some(hook), _) => hook,
            (None, Some(selector)) => {
                Arc::new(move |css: &str, _: &CssVariables| wrap_in_selector(&selector, css))
            }
            (None, None) => Arc::new(|css: &str, _: &CssVariables| default_token_css(css)),
        };

        let on_theme_gen: ThemeGenHook = match (user.on_theme_gen, selectors.themes) {
            (Some(hook), _) => hook,
            (None, Some(template)) => Arc::new(
                move |theme: &str, css: &str, _: &CssVariables, _: &MultiTheme| {
                    wrap_in_selector(&theme_selector(&template, theme), css)
                },
            ),
            (None, None) => Arc::new(|theme: &str, css: &str, _: &CssVariables, _: &MultiTheme| {
                default_theme_css(theme, css)
            }),
        };

        Self {
            prefix: user.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_owned()),
            tokens: user.tokens.unwrap_or_default(),
            themes: user.themes.unwrap_or_default(),
            components: user.components.unwrap_or_default(),
            token_to_theme: user.token_to_theme.unwrap_or(true),
            color_palette_list: user.color_palette_list.unwrap_or_default(),
            strict_colors: user.strict_colors.unwrap_or(false),
            on_token_gen,
            on_theme_gen,
        }
    }

    /// References that resolve to a token, in `category-item` kebab form.
    fn known_references(&self) -> HashSet<String> {
        let mut known = HashSet::new();
        for (category, items) in &self.tokens {
            for item_key in items.keys() {
                known.insert(camel_to_kebab(&format!("{category}-{item_key}")));
                if category == COLORS && self.color_palette_list.contains(item_key) {
                    for shade in SHADES {
                        known.insert(camel_to_kebab(&format!("{category}-{item_key}-{shade}")));
                    }
                }
            }
        }
        known
    }

    /// Checks that every theme and component reference names a token.
    pub fn validate_references(&self) -> Result<(), OptionsError> {
        let known = self.known_references();
        let check = |scope: String, reference: &str| {
            if known.contains(&camel_to_kebab(reference)) {
                Ok(())
            } else {
                Err(OptionsError::UnknownTokenReference {
                    scope,
                    reference: reference.to_owned(),
                })
            }
        };

        for (name, theme) in &self.themes {
            for (category, items) in theme {
                for (item_key, item) in items {
                    if let Some(token) = item.token.as_deref().filter(|t| !t.is_empty()) {
                        check(format!("themes.{name}.{category}.{item_key}"), token)?;
                    }
                }
            }
        }

        for (component, slots) in &self.components {
            for (slot, reference) in slots {
                check(format!("components.{component}.{slot}"), reference)?;
            }
        }

        Ok(())
    }
}
