//! Named tag operations.
//!
//! The vocabulary is open: anything implementing [`TagOp`] can be
//! registered next to the built-ins. Names are checked at registration time,
//! so a clash is reported before any template is rendered.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::context::{Block, RenderContext};
use crate::error::TagError;
use crate::ops::builtins;
use crate::tag::{TagCall, TagOp};

/// Operation lookup by name.
#[derive(Clone, Default)]
pub struct TagRegistry {
    ops: BTreeMap<String, Arc<dyn TagOp>>,
}

impl TagRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in operation.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for op in builtins() {
            let name = op.name().to_string();
            registry.ops.insert(name, op);
        }
        registry
    }

    /// Add an operation; fails with [`TagError::DuplicateTag`] on a name clash.
    pub fn register(&mut self, op: Arc<dyn TagOp>) -> Result<(), TagError> {
        let name = op.name().to_string();
        if self.ops.contains_key(&name) {
            return Err(TagError::DuplicateTag(name));
        }
        tracing::debug!(tag = %name, element = %op.element(), "registered tag operation");
        self.ops.insert(name, op);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Arc<dyn TagOp>, TagError> {
        self.ops
            .get(name)
            .ok_or_else(|| TagError::UnknownTag(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Operations in name order.
    pub fn ops(&self) -> impl Iterator<Item = &Arc<dyn TagOp>> {
        self.ops.values()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Buffer-append mode: emit `name` into `ctx`.
    pub fn emit(
        &self,
        ctx: &mut RenderContext,
        name: &str,
        call: TagCall,
        body: Option<Block<'_>>,
    ) -> Result<(), TagError> {
        self.get(name)?.emit(ctx, call, body)
    }

    /// Expression mode: emit `name` into a scratch context and return the
    /// text. Produces exactly what [`emit`](Self::emit) would append.
    pub fn render_expr(
        &self,
        name: &str,
        call: TagCall,
        body: Option<Block<'_>>,
    ) -> Result<String, TagError> {
        let mut scratch = RenderContext::new();
        self.emit(&mut scratch, name, call, body)?;
        scratch.finish()
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("ops", &self.ops.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::FieldTag;

    #[test]
    fn builtins_are_registered_under_their_names() {
        let registry = TagRegistry::with_builtins();
        for name in ["view", "for_each", "options_for", "textbox", "checkbox", "section", "submit"] {
            assert!(registry.contains(name), "missing built-in {name}");
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = TagRegistry::with_builtins();
        let err = registry
            .register(Arc::new(FieldTag::new("textbox", "value")))
            .unwrap_err();
        assert_eq!(err, TagError::DuplicateTag("textbox".to_string()));
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let registry = TagRegistry::with_builtins();
        let err = registry.render_expr("marquee", TagCall::new(), None).unwrap_err();
        assert_eq!(err, TagError::UnknownTag("marquee".to_string()));
    }
}
