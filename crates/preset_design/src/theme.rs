//! Named themes that override token slots with literals or token references.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    color::{color_value, ColorError},
    naming::{css_variable_name, token_variable_name},
    tokens::{CssVariables, COLORS},
};

/// Slot value of a theme: a literal, a token reference, or both.
///
/// When `token` is set it wins and the slot points at the referenced token's
/// custom property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeItem {
    /// Literal value; color literals are normalized for the `colors` category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Reference in `category-item` form, e.g. `colors-primary`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ThemeItem {
    /// Slot holding a literal value.
    #[must_use]
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            token: None,
        }
    }

    /// Slot referencing another token.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            value: None,
            token: Some(token.into()),
        }
    }

    fn reference(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    fn literal(&self) -> Option<&str> {
        self.value.as_deref().filter(|value| !value.is_empty())
    }
}

/// Theme slots keyed by category, then by item.
pub type Theme = IndexMap<String, IndexMap<String, ThemeItem>>;

/// Themes keyed by name, e.g. `light`, `dark`.
pub type MultiTheme = IndexMap<String, Theme>;

/// Resolves the custom properties a theme declares.
///
/// Items carrying neither a token reference nor a value are skipped.
pub fn css_variables_by_theme(
    theme: &Theme,
    prefix: &str,
    strict: bool,
) -> Result<CssVariables, ColorError> {
    let mut css_variables = CssVariables::new();

    for (category, items) in theme {
        for (item_key, item) in items {
            let variable = css_variable_name(category, item_key, prefix);

            let value = if let Some(token) = item.reference() {
                format!("var({})", token_variable_name(prefix, token))
            } else if let Some(literal) = item.literal() {
                if category == COLORS {
                    color_value(literal, strict)?.value
                } else {
                    literal.to_owned()
                }
            } else {
                continue;
            };

            css_variables.insert(variable, value);
        }
    }

    Ok(css_variables)
}
