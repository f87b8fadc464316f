//! The tag operation capability and its call arguments.

use std::fmt;

use crate::attrs::{AttrValue, AttributeMap};
use crate::context::{Block, RenderContext};
use crate::error::TagError;

/// Structural shape of an operation's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagShape {
    /// `<tag .../>`
    Void,
    /// `<tag ...>body</tag>`
    Block,
    /// Loop element whose body receives the iteration variable.
    Iteration,
}

impl TagShape {
    pub fn accepts_body(&self) -> bool {
        !matches!(self, TagShape::Void)
    }
}

impl fmt::Display for TagShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TagShape::Void => "void",
            TagShape::Block => "block",
            TagShape::Iteration => "iteration",
        };
        f.write_str(s)
    }
}

/// Named arguments of one tag operation call.
///
/// Operations take the arguments they understand; whatever is left over is
/// an explicit attribute override, see [`TagCall::into_attrs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCall {
    args: AttributeMap,
}

impl TagCall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.args.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.args.get(key)
    }

    pub fn take(&mut self, key: &str) -> Option<AttrValue> {
        self.args.remove(key)
    }

    pub fn require(&mut self, tag: &str, key: &str) -> Result<AttrValue, TagError> {
        self.take(key).ok_or_else(|| TagError::missing(tag, key))
    }

    /// Remaining arguments, as explicit attributes in call order.
    pub fn into_attrs(self) -> AttributeMap {
        self.args
    }
}

impl From<AttributeMap> for TagCall {
    fn from(args: AttributeMap) -> Self {
        TagCall { args }
    }
}

/// One tag-builder operation.
///
/// Implementations append to the given context only; they hold no
/// per-render state, so one instance serves every render.
pub trait TagOp: Send + Sync {
    /// Operation name as templates call it, e.g. `expandable_textbox`.
    fn name(&self) -> &str;

    /// Emitted element name, e.g. `f:expandableTextbox`.
    fn element(&self) -> &str;

    fn shape(&self) -> TagShape;

    /// Append this element (and the nested block's output) to `ctx`.
    fn emit(
        &self,
        ctx: &mut RenderContext,
        call: TagCall,
        body: Option<Block<'_>>,
    ) -> Result<(), TagError>;
}

/// Reject a body handed to a void operation.
pub(crate) fn no_body(op: &dyn TagOp, body: &Option<Block<'_>>) -> Result<(), TagError> {
    if body.is_some() {
        return Err(TagError::UnexpectedBody(op.name().to_string()));
    }
    Ok(())
}
