//! Naming-convention defaults.
//!
//! A value wrapped as `${...}` is already a fully-qualified expression for the
//! downstream markup consumer and passes through untouched. Bare names are
//! wrapped with a lookup root: `instance` for bound field values,
//! `descriptor` for collections.

/// Opening marker of a dynamic expression.
pub const EXPR_OPEN: &str = "${";
/// Closing marker of a dynamic expression.
pub const EXPR_CLOSE: &str = "}";

/// Lookup root for bound field values.
pub const INSTANCE_ROOT: &str = "instance";
/// Lookup root for collections.
pub const DESCRIPTOR_ROOT: &str = "descriptor";

/// Default iteration variable of `for_each`.
pub const DEFAULT_LOOP_VAR: &str = "it";
/// Default iteration variable of `options_for`.
pub const DEFAULT_OPTION_VAR: &str = "option";
/// Default per-option attribute compared against the selected value.
pub const DEFAULT_OPTION_VALUE: &str = "name";

/// `true` when `token` is `${` + at least one character + `}`.
pub fn is_dynamic_expression(token: &str) -> bool {
    token.len() > EXPR_OPEN.len() + EXPR_CLOSE.len()
        && token.starts_with(EXPR_OPEN)
        && token.ends_with(EXPR_CLOSE)
}

/// Inner content of a dynamic expression, or `None` for a bare token.
pub fn unwrap_expression(token: &str) -> Option<&str> {
    if !is_dynamic_expression(token) {
        return None;
    }
    Some(&token[EXPR_OPEN.len()..token.len() - EXPR_CLOSE.len()])
}

/// Wrap `inner` as `${inner}`.
pub fn wrap_expression(inner: &str) -> String {
    format!("{EXPR_OPEN}{inner}{EXPR_CLOSE}")
}

/// Resolve a collection token: `${...}` is kept, anything else becomes
/// `${descriptor.<token>}`.
pub fn collection_reference(token: &str) -> String {
    if is_dynamic_expression(token) {
        token.to_string()
    } else {
        wrap_expression(&format!("{DESCRIPTOR_ROOT}.{token}"))
    }
}

/// Substring after the final `.`, or the whole name.
pub fn leaf_name(field: &str) -> &str {
    match field.rfind('.') {
        Some(idx) => &field[idx + 1..],
        None => field,
    }
}

/// Default bound value of a field tag: `${instance.<leaf>}`.
///
/// The dotted prefix only qualifies the emitted `name`; the instance lookup
/// always uses the leaf.
pub fn bound_value(field: &str) -> String {
    wrap_expression(&format!("{INSTANCE_ROOT}.{}", leaf_name(field)))
}

/// The three expressions an enumerated-option loop needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionComparison {
    /// Resolved collection reference for the loop's `items`.
    pub items: String,
    /// Per-item comparison base, `<var>.<value-attr>`.
    pub option: String,
    /// Expression naming the currently selected value (no `${}` markers).
    pub selected: String,
}

impl SelectionComparison {
    /// `${<option> == <selected>}`
    pub fn selected_test(&self) -> String {
        wrap_expression(&format!("{} == {}", self.option, self.selected))
    }

    /// `${<option>}`
    pub fn option_label(&self) -> String {
        wrap_expression(&self.option)
    }
}

/// Build the selection comparison for `items` / `selected`.
///
/// `selected` that is already a `${...}` expression contributes its inner
/// content verbatim; a bare field name becomes `instance.<selected>`.
pub fn selection_comparison(
    items: &str,
    selected: &str,
    var: &str,
    value_attr: &str,
) -> SelectionComparison {
    let selected = match unwrap_expression(selected) {
        Some(inner) => inner.to_string(),
        None => format!("{INSTANCE_ROOT}.{selected}"),
    };
    SelectionComparison {
        items: collection_reference(items),
        option: format!("{var}.{value_attr}"),
        selected,
    }
}

/// lowerCamelCase an operation name on `_`: `expandable_textbox` →
/// `expandableTextbox`.
pub fn camel_case(op_name: &str) -> String {
    let mut out = String::with_capacity(op_name.len());
    let mut upper_next = false;
    for ch in op_name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Namespaced element name for an operation: `f` + `optional_block` →
/// `f:optionalBlock`.
pub fn element_name(namespace: &str, op_name: &str) -> String {
    format!("{namespace}:{}", camel_case(op_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_expression_needs_content() {
        assert!(is_dynamic_expression("${a}"));
        assert!(!is_dynamic_expression("${}"));
        assert!(!is_dynamic_expression("$a}"));
        assert!(!is_dynamic_expression("${a"));
        assert!(!is_dynamic_expression("installations"));
    }

    #[test]
    fn unwrap_strips_markers_only_when_wrapped() {
        assert_eq!(unwrap_expression("${instance.foo}"), Some("instance.foo"));
        assert_eq!(unwrap_expression("instance.foo"), None);
    }

    #[test]
    fn leaf_name_takes_last_segment() {
        assert_eq!(leaf_name("foo"), "foo");
        assert_eq!(leaf_name("foo.bar"), "bar");
        assert_eq!(leaf_name("a.b.c"), "c");
        assert_eq!(leaf_name("trailing."), "");
    }

    #[test]
    fn camel_case_joins_segments() {
        assert_eq!(camel_case("textbox"), "textbox");
        assert_eq!(camel_case("expandable_textbox"), "expandableTextbox");
        assert_eq!(camel_case("validate_button"), "validateButton");
        assert_eq!(camel_case("_private"), "private");
        assert_eq!(element_name("j", "for_each"), "j:forEach");
    }

    #[test]
    fn selected_expression_passes_through_inner_content() {
        let sel = selection_comparison("installations", "${instance.foo}", "option", "name");
        assert_eq!(sel.selected, "instance.foo");
        assert_eq!(sel.selected_test(), "${option.name == instance.foo}");
    }
}
