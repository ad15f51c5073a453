//! Projection of flattened tokens into the host framework's theme object.

use indexmap::IndexMap;

use crate::tokens::{CssVariableConfigs, COLORS};

/// Theme object handed to the host: category -> item -> CSS expression.
pub type FrameworkTheme = IndexMap<String, IndexMap<String, String>>;

/// Maps every token entry to a `var()` expression.
///
/// Color entries are wrapped in their color function, so utilities receive
/// `rgb(var(--soy-colors-primary))` and can switch themes at runtime.
#[must_use]
pub fn transform_tokens_to_framework_theme(configs: &CssVariableConfigs) -> FrameworkTheme {
    configs
        .iter()
        .map(|(category, entries)| {
            let items: IndexMap<String, String> = entries
                .iter()
                .map(|entry| {
                    let reference = format!("var({})", entry.variable);
                    let expression = match entry.color_space {
                        Some(space) if category == COLORS => format!("{space}({reference})"),
                        _ => reference,
                    };
                    (entry.token_key.clone(), expression)
                })
                .collect();
            (category.clone(), items)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::ColorSpace, tokens::CssVariableEntry};

    fn entry(key: &str, variable: &str, space: Option<ColorSpace>) -> CssVariableEntry {
        CssVariableEntry {
            token_key: key.into(),
            variable: variable.into(),
            value: String::new(),
            color_space: space,
        }
    }

    #[test]
    fn colors_are_wrapped_in_their_color_function() {
        let mut configs = CssVariableConfigs::new();
        configs.insert(
            COLORS.into(),
            vec![
                entry("primary", "--soy-colors-primary", Some(ColorSpace::Rgb)),
                entry("info", "--soy-colors-info", Some(ColorSpace::Hsl)),
            ],
        );
        configs.insert(
            "spacing".into(),
            vec![entry("md", "--soy-spacing-md", None)],
        );

        let theme = transform_tokens_to_framework_theme(&configs);
        assert_eq!(theme[COLORS]["primary"], "rgb(var(--soy-colors-primary))");
        assert_eq!(theme[COLORS]["info"], "hsl(var(--soy-colors-info))");
        assert_eq!(theme["spacing"]["md"], "var(--soy-spacing-md)");
    }

    #[test]
    fn colors_without_a_space_stay_bare() {
        let mut configs = CssVariableConfigs::new();
        configs.insert(
            COLORS.into(),
            vec![entry("custom", "--soy-colors-custom", None)],
        );
        let theme = transform_tokens_to_framework_theme(&configs);
        assert_eq!(theme[COLORS]["custom"], "var(--soy-colors-custom)");
    }

    #[test]
    fn empty_categories_are_projected() {
        let mut configs = CssVariableConfigs::new();
        configs.insert("spacing".into(), Vec::new());
        let theme = transform_tokens_to_framework_theme(&configs);
        assert!(theme["spacing"].is_empty());
    }
}
