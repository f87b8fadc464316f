//! Field tags: self-closing form inputs bound to an instance field.

use crate::attrs::{AttrValue, AttributeMap};
use crate::context::{Block, RenderContext};
use crate::convention::{bound_value, element_name};
use crate::error::TagError;
use crate::ops::FORM_NS;
use crate::tag::{no_body, TagCall, TagOp, TagShape};

/// `<f:textbox name="group.field" value="${instance.field}"/>` and friends.
///
/// `name` is emitted exactly as given. The bound-value attribute (`value`,
/// `checked`, ...) defaults to `${instance.<leaf>}` and is only derived when
/// the call does not supply it.
#[derive(Debug, Clone)]
pub struct FieldTag {
    name: String,
    element: String,
    value_attr: String,
    defaults: AttributeMap,
}

impl FieldTag {
    pub fn new(name: &str, value_attr: &str) -> Self {
        FieldTag {
            name: name.to_string(),
            element: element_name(FORM_NS, name),
            value_attr: value_attr.to_string(),
            defaults: AttributeMap::new(),
        }
    }

    pub fn element_override(mut self, element: &str) -> Self {
        self.element = element.to_string();
        self
    }

    pub fn defaults(mut self, defaults: AttributeMap) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn value_attr(&self) -> &str {
        &self.value_attr
    }

    fn attributes(&self, mut call: TagCall) -> Result<AttributeMap, TagError> {
        let field = call.require(&self.name, "name")?;
        let value = match call.take(&self.value_attr) {
            Some(explicit) => explicit,
            None => AttrValue::from(bound_value(field.as_str())),
        };

        let mut attrs = AttributeMap::new()
            .with("name", field)
            .with(self.value_attr.clone(), value);
        for (key, default) in self.defaults.iter() {
            if !attrs.contains_key(key) {
                attrs.insert(key, default.clone());
            }
        }
        Ok(attrs.merge(call.into_attrs()))
    }
}

impl TagOp for FieldTag {
    fn name(&self) -> &str {
        &self.name
    }

    fn element(&self) -> &str {
        &self.element
    }

    fn shape(&self) -> TagShape {
        TagShape::Void
    }

    fn emit(
        &self,
        ctx: &mut RenderContext,
        call: TagCall,
        body: Option<Block<'_>>,
    ) -> Result<(), TagError> {
        no_body(self, &body)?;
        let attrs = self.attributes(call)?;
        ctx.void_tag(&self.element, &attrs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(op: &FieldTag, call: TagCall) -> String {
        let mut ctx = RenderContext::new();
        op.emit(&mut ctx, call, None).unwrap();
        ctx.finish().unwrap()
    }

    #[test]
    fn explicit_value_keeps_its_position() {
        let op = FieldTag::new("textbox", "value");
        let out = render(
            &op,
            TagCall::new()
                .arg("name", "foo")
                .arg("class", "wide")
                .arg("value", "${other.foo}"),
        );
        assert_eq!(
            out,
            r#"<f:textbox name="foo" value="${other.foo}" class="wide"/>"#
        );
    }

    #[test]
    fn literal_defaults_never_beat_derived_value_or_explicit_attrs() {
        let op = FieldTag::new("password", "value")
            .defaults(AttributeMap::new().with("class", "secret").with("name", "ignored"));
        let out = render(&op, TagCall::new().arg("name", "creds.token"));
        assert_eq!(
            out,
            r#"<f:password name="creds.token" value="${instance.token}" class="secret"/>"#
        );
    }
}
