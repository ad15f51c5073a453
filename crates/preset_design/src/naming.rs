//! CSS custom property naming.

/// Replaces every ASCII uppercase letter with `-` and its lowercase form.
///
/// A leading `-` is dropped, so `PrimaryColor` becomes `primary-color`.
#[must_use]
pub fn camel_to_kebab(input: &str) -> String {
    let mut kebab = String::with_capacity(input.len() + 4);
    for ch in input.chars() {
        if ch.is_ascii_uppercase() {
            kebab.push('-');
            kebab.push(ch.to_ascii_lowercase());
        } else {
            kebab.push(ch);
        }
    }

    match kebab.strip_prefix('-') {
        Some(rest) => rest.to_owned(),
        None => kebab,
    }
}

/// Custom property for a token item, e.g. `--soy-border-radius-lg`.
#[must_use]
pub fn css_variable_name(category: &str, key: &str, prefix: &str) -> String {
    format!("--{}", camel_to_kebab(&format!("{prefix}-{category}-{key}")))
}

/// Custom property a `category-item` token reference points at.
#[must_use]
pub fn token_variable_name(prefix: &str, token: &str) -> String {
    format!("--{}", camel_to_kebab(&format!("{prefix}-{token}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn camel_case_becomes_kebab_case() {
        assert_eq!(camel_to_kebab("borderRadius"), "border-radius");
        assert_eq!(camel_to_kebab("PrimaryColor"), "primary-color");
        assert_eq!(camel_to_kebab("primary-500"), "primary-500");
        assert_eq!(camel_to_kebab(""), "");
    }

    #[test]
    fn variable_names_join_prefix_category_and_key() {
        assert_eq!(
            css_variable_name("colors", "primary", "soy"),
            "--soy-colors-primary"
        );
        assert_eq!(
            css_variable_name("borderRadius", "lg", "soy"),
            "--soy-border-radius-lg"
        );
        assert_eq!(
            css_variable_name("colors", "primary-50", "app"),
            "--app-colors-primary-50"
        );
        assert_eq!(
            token_variable_name("soy", "colors-primary"),
            css_variable_name("colors", "primary", "soy")
        );
    }

    #[test]
    fn distinct_triples_produce_distinct_names() {
        let triples = [
            ("soy", "colors", "primary"),
            ("soy", "colors", "secondary"),
            ("soy", "spacing", "primary"),
            ("app", "colors", "primary"),
            ("soy", "fontSize", "lg"),
            ("soy", "lineHeight", "lg"),
        ];
        let names: HashSet<String> = triples
            .iter()
            .map(|(prefix, category, key)| css_variable_name(category, key, prefix))
            .collect();
        assert_eq!(names.len(), triples.len());
        assert_eq!(
            css_variable_name("fontSize", "lg", "soy"),
            css_variable_name("fontSize", "lg", "soy")
        );
    }
}
