//! Tera rendering engine bound to a tag registry.

use std::sync::Arc;

use tera::Tera;

use jellyforge_core::{RenderContext, TagRegistry};

use crate::bridge::register_tags;
use crate::context::TemplateContext;
use crate::error::RenderError;

/// Evaluates template sources with every registered tag operation callable.
///
/// The engine itself is immutable; each [`render`](Self::render) works on its
/// own copy of the tera instance and its own [`RenderContext`], so renders
/// share no mutable state.
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Tera,
    registry: Arc<TagRegistry>,
}

impl TemplateEngine {
    /// Engine exposing the operations of `registry`.
    pub fn new(registry: TagRegistry) -> Self {
        let registry = Arc::new(registry);
        let mut tera = Tera::default();
        // Attribute values are emitted verbatim.
        tera.autoescape_on(vec![]);
        register_tags(&mut tera, &registry);
        TemplateEngine { tera, registry }
    }

    /// Engine exposing the built-in vocabulary only.
    pub fn with_builtins() -> Self {
        Self::new(TagRegistry::with_builtins())
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Evaluate `source` (registered as `name`) and return the rendered text.
    ///
    /// Nothing is returned unless the whole template evaluated; a failure
    /// part-way through discards the partial output.
    pub fn render(
        &self,
        name: &str,
        source: &str,
        vars: &TemplateContext,
    ) -> Result<String, RenderError> {
        let tera_ctx = vars.to_tera_context()?;
        let mut tera = self.tera.clone();
        tera.add_raw_template(name, source)
            .map_err(|e| RenderError::from_tera(name, e))?;

        let mut ctx = RenderContext::new();
        tera.render_to(name, &tera_ctx, &mut ctx)
            .map_err(|e| RenderError::from_tera(name, e))?;
        tracing::debug!(
            template = %name,
            bytes = ctx.buffer().len(),
            fragments = ctx.buffer().fragment_count(),
            "evaluated template"
        );
        ctx.finish().map_err(|source| RenderError::Tag {
            template: name.to_string(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
