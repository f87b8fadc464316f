//! Exposes tag operations to tera templates.
//!
//! Every operation is a tera function returning its markup:
//!
//! ```text
//! {{ textbox(name="foo.bar", class="wide") }}
//! ```
//!
//! Operations that take a body are also registered as filters, so they can
//! wrap a filter section. The rendered section is the nested block:
//!
//! ```text
//! {% filter section(title="Options") %}{{ checkbox(name="verbose") }}{% endfilter %}
//! ```
//!
//! Tera passes keyword arguments unordered; they are handed to the
//! operation sorted by name so the emitted attribute order is stable.

use std::collections::HashMap;
use std::sync::Arc;

use tera::{Filter, Function, Tera, Value};

use jellyforge_core::{AttrValue, Block, TagCall, TagError, TagRegistry};

/// Convert one template argument into an attribute value.
pub fn attr_value(tag: &str, key: &str, value: &Value) -> Result<AttrValue, TagError> {
    match value {
        Value::String(s) => Ok(AttrValue::from(s.as_str())),
        Value::Number(n) => Ok(AttrValue::from(n.to_string())),
        Value::Bool(b) => Ok(AttrValue::from(*b)),
        Value::Null => Err(TagError::invalid_value(tag, key, "null")),
        Value::Array(_) => Err(TagError::invalid_value(tag, key, "array")),
        Value::Object(_) => Err(TagError::invalid_value(tag, key, "object")),
    }
}

/// Build a [`TagCall`] from tera keyword arguments, keys in ascending order.
pub fn tag_call(tag: &str, args: &HashMap<String, Value>) -> Result<TagCall, TagError> {
    let mut keys: Vec<&String> = args.keys().collect();
    keys.sort();
    let mut call = TagCall::new();
    for key in keys {
        call = call.arg(key.as_str(), attr_value(tag, key, &args[key])?);
    }
    Ok(call)
}

fn engine_error(tag: &str, err: TagError) -> tera::Error {
    tera::Error::chain(format!("tag '{tag}' failed"), err)
}

/// `{{ name(..) }}`: expression mode, no body.
struct TagFunction {
    registry: Arc<TagRegistry>,
    name: String,
}

impl Function for TagFunction {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let call = tag_call(&self.name, args).map_err(|e| engine_error(&self.name, e))?;
        self.registry
            .render_expr(&self.name, call, None)
            .map(Value::String)
            .map_err(|e| engine_error(&self.name, e))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// `{% filter name(..) %}body{% endfilter %}`: the body is the nested block.
struct TagFilter {
    registry: Arc<TagRegistry>,
    name: String,
}

impl Filter for TagFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let body = value.as_str().ok_or_else(|| {
            tera::Error::msg(format!(
                "tag '{}' can only wrap rendered text, got {value}",
                self.name
            ))
        })?;
        let call = tag_call(&self.name, args).map_err(|e| engine_error(&self.name, e))?;
        self.registry
            .render_expr(&self.name, call, Some(Block::text(body)))
            .map(Value::String)
            .map_err(|e| engine_error(&self.name, e))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Register every operation of `registry` on `tera`.
pub fn register_tags(tera: &mut Tera, registry: &Arc<TagRegistry>) {
    for op in registry.ops() {
        let name = op.name().to_string();
        tera.register_function(
            &name,
            TagFunction {
                registry: Arc::clone(registry),
                name: name.clone(),
            },
        );
        if op.shape().accepts_body() {
            tera.register_filter(
                &name,
                TagFilter {
                    registry: Arc::clone(registry),
                    name: name.clone(),
                },
            );
        }
        tracing::trace!(tag = %name, shape = %op.shape(), "bound tag to template engine");
    }
}
