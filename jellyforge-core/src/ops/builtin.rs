//! The built-in tag vocabulary.

use std::sync::Arc;

use crate::attrs::AttributeMap;
use crate::ops::element::{ElementTag, Param};
use crate::ops::field::FieldTag;
use crate::ops::iteration::{ForEach, OptionsFor};
use crate::ops::FORM_NS;
use crate::tag::{TagOp, TagShape};

/// Namespace declarations carried by every `view` root element.
pub const VIEW_NAMESPACES: &[(&str, &str)] = &[
    ("xmlns:j", "jelly:core"),
    ("xmlns:st", "jelly:stapler"),
    ("xmlns:d", "jelly:define"),
    ("xmlns:l", "/lib/layout"),
    ("xmlns:t", "/lib/hudson"),
    ("xmlns:f", "/lib/form"),
];

/// Every built-in operation, in a stable order.
pub fn builtins() -> Vec<Arc<dyn TagOp>> {
    vec![
        // root
        Arc::new(
            ElementTag::with_element("view", "j:jelly", TagShape::Block)
                .defaults(VIEW_NAMESPACES.iter().copied().collect::<AttributeMap>()),
        ),
        // loops
        Arc::new(ForEach),
        Arc::new(OptionsFor),
        // bound fields
        Arc::new(FieldTag::new("textbox", "value")),
        Arc::new(FieldTag::new("expandable_textbox", "value")),
        Arc::new(FieldTag::new("textarea", "value")),
        Arc::new(FieldTag::new("checkbox", "checked")),
        // containers
        Arc::new(ElementTag::new(FORM_NS, "entry", TagShape::Block).param(Param::required("name"))),
        Arc::new(ElementTag::new(FORM_NS, "section", TagShape::Block).param(Param::optional("title"))),
        Arc::new(ElementTag::new(FORM_NS, "advanced", TagShape::Block)),
        Arc::new(ElementTag::new(FORM_NS, "block", TagShape::Block)),
        Arc::new(
            ElementTag::new(FORM_NS, "optional_block", TagShape::Block)
                .param(Param::required("name"))
                .param(Param::required("title"))
                .param(Param::defaulted("checked", false)),
        ),
        Arc::new(
            ElementTag::new(FORM_NS, "form", TagShape::Block)
                .param(Param::required("name"))
                .param(Param::required("action"))
                .param(Param::defaulted("method", "post")),
        ),
        // widgets
        Arc::new(
            ElementTag::new(FORM_NS, "validate_button", TagShape::Void)
                .param(Param::required("title"))
                .param(Param::required("with"))
                .param(Param::defaulted("method", "validate"))
                .param(Param::defaulted("progress", "")),
        ),
        Arc::new(
            ElementTag::new(FORM_NS, "boolean_radio", TagShape::Void)
                .param(Param::required("field"))
                .param(Param::defaulted("false_label", "No").emitted_as("false"))
                .param(Param::defaulted("true_label", "Yes").emitted_as("true")),
        ),
        Arc::new(
            ElementTag::new(FORM_NS, "combobox", TagShape::Void)
                .param(Param::required("field"))
                .param(Param::optional("clazz")),
        ),
        Arc::new(
            ElementTag::new(FORM_NS, "submit", TagShape::Void)
                .param(Param::required("value"))
                .param(Param::optional("name")),
        ),
    ]
}
