//! Plain elements whose attributes come from declared parameters.

use crate::attrs::{AttrValue, AttributeMap};
use crate::context::{Block, RenderContext, Scope};
use crate::convention::element_name;
use crate::error::TagError;
use crate::tag::{no_body, TagCall, TagOp, TagShape};

/// What happens when a parameter is not supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamDefault {
    Required,
    /// Attribute is omitted entirely.
    Optional,
    Value(AttrValue),
}

/// A named argument that maps onto one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Argument name at the call site.
    pub arg: String,
    /// Attribute name in the emitted tag.
    pub attr: String,
    pub default: ParamDefault,
}

impl Param {
    pub fn required(arg: &str) -> Self {
        Self::with_default(arg, ParamDefault::Required)
    }

    pub fn optional(arg: &str) -> Self {
        Self::with_default(arg, ParamDefault::Optional)
    }

    pub fn defaulted(arg: &str, value: impl Into<AttrValue>) -> Self {
        Self::with_default(arg, ParamDefault::Value(value.into()))
    }

    /// Emit under a different attribute name than the argument's.
    pub fn emitted_as(mut self, attr: &str) -> Self {
        self.attr = attr.to_string();
        self
    }

    fn with_default(arg: &str, default: ParamDefault) -> Self {
        Param {
            arg: arg.to_string(),
            attr: arg.to_string(),
            default,
        }
    }
}

/// An element built from parameters, literal defaults and explicit attributes.
///
/// Attribute order: parameters in declaration order, then literal defaults
/// not already set, then explicit attributes (which replace any earlier
/// value in place).
#[derive(Debug, Clone)]
pub struct ElementTag {
    name: String,
    element: String,
    shape: TagShape,
    params: Vec<Param>,
    defaults: AttributeMap,
}

impl ElementTag {
    /// Element name derived from the operation name in `namespace`.
    pub fn new(namespace: &str, name: &str, shape: TagShape) -> Self {
        Self::with_element(name, &element_name(namespace, name), shape)
    }

    pub fn with_element(name: &str, element: &str, shape: TagShape) -> Self {
        ElementTag {
            name: name.to_string(),
            element: element.to_string(),
            shape,
            params: Vec::new(),
            defaults: AttributeMap::new(),
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn defaults(mut self, defaults: AttributeMap) -> Self {
        self.defaults = defaults;
        self
    }

    fn attributes(&self, mut call: TagCall) -> Result<AttributeMap, TagError> {
        let mut attrs = AttributeMap::new();
        for param in &self.params {
            match (call.take(&param.arg), &param.default) {
                (Some(value), _) => {
                    attrs.insert(param.attr.clone(), value);
                }
                (None, ParamDefault::Required) => {
                    return Err(TagError::missing(&self.name, &param.arg));
                }
                (None, ParamDefault::Optional) => {}
                (None, ParamDefault::Value(value)) => {
                    attrs.insert(param.attr.clone(), value.clone());
                }
            }
        }
        for (key, value) in self.defaults.iter() {
            if !attrs.contains_key(key) {
                attrs.insert(key, value.clone());
            }
        }
        Ok(attrs.merge(call.into_attrs()))
    }
}

impl TagOp for ElementTag {
    fn name(&self) -> &str {
        &self.name
    }

    fn element(&self) -> &str {
        &self.element
    }

    fn shape(&self) -> TagShape {
        self.shape
    }

    fn emit(
        &self,
        ctx: &mut RenderContext,
        call: TagCall,
        body: Option<Block<'_>>,
    ) -> Result<(), TagError> {
        let attrs = self.attributes(call)?;
        if self.shape.accepts_body() {
            ctx.element(&self.element, &attrs, body, &Scope::default())
        } else {
            no_body(self, &body)?;
            ctx.void_tag(&self.element, &attrs);
            Ok(())
        }
    }
}
