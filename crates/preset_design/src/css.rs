//! Serialization of custom properties into CSS text.

use crate::tokens::CssVariables;

/// Selector wrapping the token declarations by default.
pub const DEFAULT_TOKEN_SELECTOR: &str = ":root";

/// Selector template wrapping each theme by default; `{theme}` is the name.
pub const DEFAULT_THEME_SELECTOR: &str = "html[data-theme=\"{theme}\"]";

/// Joins the declarations as `name: value;` lines.
#[must_use]
pub fn css_variable_string(css_variables: &CssVariables) -> String {
    css_variables
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps declarations in a rule block.
#[must_use]
pub fn wrap_in_selector(selector: &str, css: &str) -> String {
    format!("{selector} {{\n{css}\n}}")
}

/// Expands the `{theme}` placeholder of a selector template.
#[must_use]
pub fn theme_selector(template: &str, theme: &str) -> String {
    template.replace("{theme}", theme)
}

/// Default rendering of the token block.
#[must_use]
pub fn default_token_css(css: &str) -> String {
    wrap_in_selector(DEFAULT_TOKEN_SELECTOR, css)
}

/// Default rendering of a theme block.
#[must_use]
pub fn default_theme_css(theme: &str, css: &str) -> String {
    wrap_in_selector(&theme_selector(DEFAULT_THEME_SELECTOR, theme), css)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_are_newline_joined() {
        let mut vars = CssVariables::new();
        vars.insert("--soy-colors-primary".into(), "100, 108, 255".into());
        vars.insert("--soy-spacing-md".into(), "12px".into());
        assert_eq!(
            css_variable_string(&vars),
            "--soy-colors-primary: 100, 108, 255;\n--soy-spacing-md: 12px;"
        );
    }

    #[test]
    fn empty_map_serializes_to_nothing() {
        assert_eq!(css_variable_string(&CssVariables::new()), "");
    }

    #[test]
    fn default_wrappers() {
        assert_eq!(default_token_css("--a: 1;"), ":root {\n--a: 1;\n}");
        assert_eq!(
            default_theme_css("dark", "--a: 1;"),
            "html[data-theme=\"dark\"] {\n--a: 1;\n}"
        );
        assert_eq!(theme_selector(".theme-{theme}", "light"), ".theme-light");
    }
}
