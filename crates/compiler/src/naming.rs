use pagegen_imports::ImportIdentity;
use serde::{Deserialize, Serialize};

/// Identifier substituted with the page's model type in base-type templates
pub const MODEL_PLACEHOLDER: &str = "TModel";

/// Naming parameters handed to the code generator alongside the effective
/// tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamingContext {
    /// Sanitized class name derived from the page identity
    pub class_name: String,

    /// Target namespace for the generated class
    pub namespace: String,

    /// Model type substituted for [`MODEL_PLACEHOLDER`]; `None` leaves the
    /// placeholder in place
    pub model_type: Option<String>,
}

impl NamingContext {
    /// Derive the naming context for one page
    #[must_use]
    pub fn for_page(
        page: &ImportIdentity,
        namespace: impl Into<String>,
        model_type: Option<String>,
    ) -> Self {
        let stem = page
            .as_str()
            .rsplit('/')
            .next()
            .map(|name| name.split('.').next().unwrap_or(name))
            .unwrap_or_default();
        Self {
            class_name: sanitize_class_name(stem),
            namespace: namespace.into(),
            model_type,
        }
    }
}

/// Turn an arbitrary file stem into a valid class identifier.
///
/// Non-identifier characters map to `_`; a leading digit or an empty stem
/// gets a `_` prefix so the result is always usable as a type name.
#[must_use]
pub fn sanitize_class_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Substitute the model placeholder in a base-type template.
///
/// Only whole-identifier occurrences are replaced: `TModel` inside
/// `Page<TModel>` is, `TModelBinder` is not.
#[must_use]
pub fn resolve_base_type(template: &str, model_type: Option<&str>) -> String {
    let Some(model) = model_type else {
        return template.to_string();
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(idx) = rest.find(MODEL_PLACEHOLDER) {
        let before = &rest[..idx];
        let after = &rest[idx + MODEL_PLACEHOLDER.len()..];
        let bounded_left = before.chars().next_back().map_or(true, |c| !is_ident_char(c));
        let bounded_right = after.chars().next().map_or(true, |c| !is_ident_char(c));

        out.push_str(before);
        if bounded_left && bounded_right {
            out.push_str(model);
        } else {
            out.push_str(MODEL_PLACEHOLDER);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(raw: &str) -> ImportIdentity {
        ImportIdentity::new(raw).unwrap()
    }

    #[test]
    fn class_name_from_page_identity() {
        let naming = NamingContext::for_page(&id("/app/pages/order-details.pg"), "App.Pages", None);
        assert_eq!(naming.class_name, "order_details");
        assert_eq!(naming.namespace, "App.Pages");
    }

    #[test]
    fn sanitizer_handles_digits_and_empty_stems() {
        assert_eq!(sanitize_class_name("404"), "_404");
        assert_eq!(sanitize_class_name(""), "_");
        assert_eq!(sanitize_class_name("index"), "index");
        assert_eq!(sanitize_class_name("my page"), "my_page");
    }

    #[test]
    fn placeholder_substitution_is_identifier_bounded() {
        assert_eq!(
            resolve_base_type("Page<TModel>", Some("OrderModel")),
            "Page<OrderModel>"
        );
        assert_eq!(
            resolve_base_type("Grid<TModel, TModel>", Some("Row")),
            "Grid<Row, Row>"
        );
        assert_eq!(
            resolve_base_type("TModelBinder<TModel>", Some("X")),
            "TModelBinder<X>"
        );
        assert_eq!(resolve_base_type("Page<TModel>", None), "Page<TModel>");
    }
}
