//! Loop elements.
//!
//! Rendering is code generation: the body is emitted once, inside the
//! `<j:forEach>` element that performs the actual iteration later.

use crate::attrs::{AttrValue, AttributeMap};
use crate::context::{Block, RenderContext, Scope};
use crate::convention::{
    collection_reference, selection_comparison, DEFAULT_LOOP_VAR, DEFAULT_OPTION_VALUE,
    DEFAULT_OPTION_VAR,
};
use crate::error::TagError;
use crate::tag::{TagCall, TagOp, TagShape};

const FOR_EACH_ELEMENT: &str = "j:forEach";
const OPTION_ELEMENT: &str = "f:option";

/// Reserved argument naming the iteration variable.
pub const VAR_ARG: &str = "var";

/// `for_each(items, var = "it", ..attrs)`
#[derive(Debug, Clone, Default)]
pub struct ForEach;

impl TagOp for ForEach {
    fn name(&self) -> &str {
        "for_each"
    }

    fn element(&self) -> &str {
        FOR_EACH_ELEMENT
    }

    fn shape(&self) -> TagShape {
        TagShape::Iteration
    }

    fn emit(
        &self,
        ctx: &mut RenderContext,
        mut call: TagCall,
        body: Option<Block<'_>>,
    ) -> Result<(), TagError> {
        let items = call.require(self.name(), "items")?;
        let var = take_or(&mut call, VAR_ARG, DEFAULT_LOOP_VAR);

        let attrs = AttributeMap::new()
            .with("var", var.clone())
            .with("items", collection_reference(items.as_str()))
            .merge(call.into_attrs());
        ctx.element(FOR_EACH_ELEMENT, &attrs, body, &Scope::with_var(var.0))
    }
}

/// `options_for(items, field | selected, var = "option", value = "name")`
///
/// Emits a loop over `items` with one `<f:option>` per entry, marked
/// selected when its value equals the instance's current value. `field` is a
/// bare field on `instance`; `selected` is a full expression and wins when
/// both are given.
#[derive(Debug, Clone, Default)]
pub struct OptionsFor;

impl TagOp for OptionsFor {
    fn name(&self) -> &str {
        "options_for"
    }

    fn element(&self) -> &str {
        FOR_EACH_ELEMENT
    }

    fn shape(&self) -> TagShape {
        TagShape::Iteration
    }

    fn emit(
        &self,
        ctx: &mut RenderContext,
        mut call: TagCall,
        body: Option<Block<'_>>,
    ) -> Result<(), TagError> {
        let items = call.require(self.name(), "items")?;
        let field = call.take("field");
        let selected = match (call.take("selected"), field) {
            // An explicit selection is a complete expression, never re-rooted.
            (Some(explicit), _) => format!("${{{}}}", strip_markers(explicit.as_str())),
            (None, Some(field)) => field.0,
            (None, None) => return Err(TagError::missing(self.name(), "field")),
        };
        let var = take_or(&mut call, VAR_ARG, DEFAULT_OPTION_VAR);
        let value = take_or(&mut call, "value", DEFAULT_OPTION_VALUE);

        let sel = selection_comparison(items.as_str(), &selected, var.as_str(), value.as_str());
        let attrs = AttributeMap::new()
            .with("var", var.clone())
            .with("items", sel.items.clone())
            .merge(call.into_attrs());

        let option = AttributeMap::new().with("selected", sel.selected_test());
        let label = sel.option_label();
        let mut inner = body;
        let loop_body = Block::new(move |ctx: &mut RenderContext, scope: &Scope| {
            ctx.open_tag(OPTION_ELEMENT, &option);
            ctx.append(&label);
            ctx.close_tag(OPTION_ELEMENT)?;
            match inner.as_mut() {
                Some(block) => block.call(ctx, scope),
                None => Ok(()),
            }
        });
        ctx.element(FOR_EACH_ELEMENT, &attrs, Some(loop_body), &Scope::with_var(var.0))
    }
}

fn take_or(call: &mut TagCall, key: &str, default: &str) -> AttrValue {
    call.take(key).unwrap_or_else(|| AttrValue::from(default))
}

fn strip_markers(expr: &str) -> &str {
    crate::convention::unwrap_expression(expr).unwrap_or(expr)
}
