//! Design tokens and their flattening into CSS custom properties.

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    color::{color_value, ColorError, ColorSpace},
    naming::css_variable_name,
    palette::color_palette,
};

/// Category whose values are color literals.
pub const COLORS: &str = "colors";

/// Token items of one category, keyed by item name.
pub type TokenGroup = IndexMap<String, String>;

/// Token tree keyed by category (`colors`, `spacing`, `borderRadius`, ...).
pub type TokenTree = IndexMap<String, TokenGroup>;

/// Custom property name to value, in declaration order.
pub type CssVariables = IndexMap<String, String>;

/// Structured entries per token category.
pub type CssVariableConfigs = IndexMap<String, Vec<CssVariableEntry>>;

/// A token item after flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVariableEntry {
    /// Item key within the category, `primary-50` for palette shades.
    pub token_key: String,
    /// Custom property name, e.g. `--soy-colors-primary`.
    pub variable: String,
    /// Value stored in the custom property.
    pub value: String,
    /// Color space of `value` for color tokens.
    pub color_space: Option<ColorSpace>,
}

/// Output of [`css_variables_by_tokens`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCssVariables {
    /// Every declared custom property. Later writes to a name win.
    pub css_variables: CssVariables,
    /// Entries grouped by category, palette shades ahead of their base item.
    pub configs: CssVariableConfigs,
}

impl TokenCssVariables {
    fn push(&mut self, category: &str, entry: CssVariableEntry) {
        self.css_variables
            .insert(entry.variable.clone(), entry.value.clone());
        self.configs
            .entry(category.to_owned())
            .or_default()
            .push(entry);
    }
}

/// Flattens `tokens` into custom properties named after `prefix`.
///
/// Color items listed in `palette_list` are expanded into palette shades,
/// which are emitted before the item itself.
pub fn css_variables_by_tokens(
    tokens: &TokenTree,
    prefix: &str,
    palette_list: &[String],
    strict: bool,
) -> Result<TokenCssVariables, ColorError> {
    let mut output = TokenCssVariables::default();

    for (category, group) in tokens {
        output.configs.entry(category.clone()).or_default();

        for (item_key, raw) in group {
            let variable = css_variable_name(category, item_key, prefix);

            if category != COLORS {
                output.push(
                    category,
                    CssVariableEntry {
                        token_key: item_key.clone(),
                        variable,
                        value: raw.clone(),
                        color_space: None,
                    },
                );
                continue;
            }

            let color = color_value(raw, strict)?;

            if palette_list.iter().any(|name| name == item_key) {
                // invalid bases were already reported by color_value
                if let Ok(palette) = color_palette(raw, item_key) {
                    for shade in palette.palettes {
                        let shade_key = format!("{item_key}-{}", shade.number);
                        let shade_color = color_value(&shade.hexcode, strict)?;
                        output.push(
                            category,
                            CssVariableEntry {
                                variable: css_variable_name(category, &shade_key, prefix),
                                token_key: shade_key,
                                value: shade_color.value,
                                color_space: Some(shade_color.space),
                            },
                        );
                    }
                }
            }

            output.push(
                category,
                CssVariableEntry {
                    token_key: item_key.clone(),
                    variable,
                    value: color.value,
                    color_space: Some(color.space),
                },
            );
        }
    }

    debug!(
        categories = output.configs.len(),
        variables = output.css_variables.len(),
        "flattened design tokens"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn tree(entries: &[(&str, &[(&str, &str)])]) -> TokenTree {
        entries
            .iter()
            .map(|(category, items)| {
                let group: TokenGroup = items
                    .iter()
                    .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                    .collect();
                ((*category).to_owned(), group)
            })
            .collect()
    }

    #[test]
    fn colors_are_normalized_into_component_lists() {
        let tokens = tree(&[(COLORS, &[("primary", "rgb(100,108,255)")])]);
        let output = css_variables_by_tokens(&tokens, "soy", &[], false).unwrap();
        assert_eq!(
            output.css_variables.get("--soy-colors-primary").map(String::as_str),
            Some("100, 108, 255")
        );
        let entry = &output.configs[COLORS][0];
        assert_eq!(entry.token_key, "primary");
        assert_eq!(entry.color_space, Some(ColorSpace::Rgb));
    }

    #[test]
    fn other_categories_keep_raw_values() {
        let tokens = tree(&[
            ("borderRadius", &[("sm", "0.125rem"), ("lg", "0.5rem")]),
            ("fontFamily", &[("sans", "Inter, sans-serif")]),
        ]);
        let output = css_variables_by_tokens(&tokens, "soy", &[], false).unwrap();
        let names: Vec<&str> = output.css_variables.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            [
                "--soy-border-radius-sm",
                "--soy-border-radius-lg",
                "--soy-font-family-sans"
            ]
        );
        assert_eq!(output.css_variables["--soy-font-family-sans"], "Inter, sans-serif");
        assert!(output.configs["borderRadius"]
            .iter()
            .all(|entry| entry.color_space.is_none()));
    }

    #[test]
    fn palette_shades_precede_the_base_entry() {
        let tokens = tree(&[(
            COLORS,
            &[("primary", "rgb(100,108,255)"), ("info", "hsl(223, 86%, 89%)")],
        )]);
        let output =
            css_variables_by_tokens(&tokens, "soy", &["primary".to_owned()], false).unwrap();

        let keys: Vec<&str> = output.configs[COLORS]
            .iter()
            .map(|entry| entry.token_key.as_str())
            .collect();
        assert_eq!(keys.len(), 13);
        assert_eq!(keys[0], "primary-50");
        assert_eq!(keys[10], "primary-950");
        assert_eq!(keys[11], "primary");
        assert_eq!(keys[12], "info");

        for shade in crate::palette::SHADES {
            assert!(output
                .css_variables
                .contains_key(&format!("--soy-colors-primary-{shade}")));
        }
        assert_eq!(output.css_variables["--soy-colors-primary"], "100, 108, 255");
        assert_eq!(output.css_variables["--soy-colors-primary-400"], "100, 108, 255");
        assert_eq!(output.css_variables["--soy-colors-info"], "223, 86%, 89%");
    }

    #[test]
    fn colliding_names_keep_the_last_value() {
        let tokens = tree(&[(
            COLORS,
            &[("primary-50", "#000000"), ("primary", "rgb(100,108,255)")],
        )]);
        let output =
            css_variables_by_tokens(&tokens, "soy", &["primary".to_owned()], false).unwrap();
        assert_ne!(output.css_variables["--soy-colors-primary-50"], "0, 0, 0");
        assert_eq!(
            output.css_variables.get_index_of("--soy-colors-primary-50"),
            Some(0)
        );
    }

    #[test]
    fn empty_categories_are_kept() {
        let tokens = tree(&[("spacing", &[])]);
        let output = css_variables_by_tokens(&tokens, "soy", &[], false).unwrap();
        assert!(output.css_variables.is_empty());
        assert!(output.configs["spacing"].is_empty());
    }

    #[traced_test]
    #[test]
    fn invalid_colors_are_reported_without_aborting() {
        let tokens = tree(&[(COLORS, &[("broken", "rgb(1, 2)"), ("ok", "#fff")])]);
        let output =
            css_variables_by_tokens(&tokens, "soy", &["broken".to_owned()], false).unwrap();
        assert_eq!(output.css_variables["--soy-colors-broken"], "0, 0, 0");
        assert_eq!(output.css_variables["--soy-colors-ok"], "255, 255, 255");
        assert_eq!(output.configs[COLORS].len(), 2);
        assert!(logs_contain("Invalid color : rgb(1, 2)"));
    }

    #[test]
    fn strict_mode_rejects_invalid_colors() {
        let tokens = tree(&[(COLORS, &[("broken", "rgb(1, 2)")])]);
        assert_eq!(
            css_variables_by_tokens(&tokens, "soy", &[], true),
            Err(ColorError::Invalid("rgb(1, 2)".into()))
        );
    }
}
