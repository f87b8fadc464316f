//! Per-template rendering context.
//!
//! A [`RenderContext`] owns the one [`OutputBuffer`] of a render and tracks
//! the elements currently open in it. Tag operations receive it by `&mut`
//! and nested blocks receive the same context, so every append lands in the
//! same buffer in call order. Contexts are created for one template and
//! consumed by [`RenderContext::finish`].

use std::io;

use crate::attrs::AttributeMap;
use crate::buffer::OutputBuffer;
use crate::error::TagError;

/// Values a tag operation hands to its nested block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Iteration variable name, set by loop elements.
    pub var: Option<String>,
}

impl Scope {
    pub fn with_var(var: impl Into<String>) -> Self {
        Scope {
            var: Some(var.into()),
        }
    }
}

type BlockFn<'a> = dyn FnMut(&mut RenderContext, &Scope) -> Result<(), TagError> + 'a;

/// A nested rendering callback.
pub struct Block<'a> {
    run: Box<BlockFn<'a>>,
}

impl<'a> Block<'a> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(&mut RenderContext, &Scope) -> Result<(), TagError> + 'a,
    {
        Block { run: Box::new(f) }
    }

    /// A block whose body is already-rendered text.
    pub fn text(body: impl Into<String>) -> Block<'static> {
        let body = body.into();
        Block::new(move |ctx: &mut RenderContext, _: &Scope| {
            ctx.append(&body);
            Ok(())
        })
    }

    pub fn call(&mut self, ctx: &mut RenderContext, scope: &Scope) -> Result<(), TagError> {
        (self.run)(ctx, scope)
    }
}

/// Execution environment of exactly one template render.
#[derive(Debug, Default)]
pub struct RenderContext {
    buffer: OutputBuffer,
    open: Vec<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text.
    pub fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Append `<element attrs>` and push it on the open-element stack.
    pub fn open_tag(&mut self, element: &str, attrs: &AttributeMap) {
        self.buffer.push_str(&start_tag(element, attrs, false));
        self.open.push(element.to_string());
    }

    /// Append `</element>`; `element` must be the innermost open element.
    pub fn close_tag(&mut self, element: &str) -> Result<(), TagError> {
        match self.open.last() {
            Some(top) if top == element => {
                self.open.pop();
                self.buffer.push_str(&format!("</{element}>"));
                Ok(())
            }
            top => Err(TagError::UnbalancedClose {
                expected: top.cloned(),
                found: element.to_string(),
            }),
        }
    }

    /// Append a self-closed `<element attrs/>`.
    pub fn void_tag(&mut self, element: &str, attrs: &AttributeMap) {
        self.buffer.push_str(&start_tag(element, attrs, true));
    }

    /// Open `element`, run `body` (if any) against this same context, close.
    ///
    /// The close is appended only when the body succeeds; a failing body
    /// aborts the whole render, so the buffer is never read.
    pub fn element(
        &mut self,
        element: &str,
        attrs: &AttributeMap,
        body: Option<Block<'_>>,
        scope: &Scope,
    ) -> Result<(), TagError> {
        self.open_tag(element, attrs);
        if let Some(mut body) = body {
            body.call(self, scope)?;
        }
        self.close_tag(element)
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Content appended so far.
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn buffer(&self) -> &OutputBuffer {
        &self.buffer
    }

    /// Consume the context and return the rendered text.
    pub fn finish(self) -> Result<String, TagError> {
        if !self.open.is_empty() {
            return Err(TagError::UnclosedTags(self.open));
        }
        Ok(self.buffer.into_string())
    }
}

/// Template engines stream their output into the context through this.
impl io::Write for RenderContext {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = std::str::from_utf8(buf)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, TagError::InvalidUtf8))?;
        self.buffer.push_str(text);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn start_tag(element: &str, attrs: &AttributeMap, self_closing: bool) -> String {
    let end = if self_closing { "/>" } else { ">" };
    if attrs.is_empty() {
        format!("<{element}{end}")
    } else {
        format!("<{element} {}{end}", attrs.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_closes_immediately() {
        let mut ctx = RenderContext::new();
        let attrs = AttributeMap::new().with("title", "Options");
        ctx.element("f:section", &attrs, None, &Scope::default()).unwrap();
        assert_eq!(ctx.finish().unwrap(), r#"<f:section title="Options"></f:section>"#);
    }

    #[test]
    fn nested_blocks_share_the_buffer() {
        let mut ctx = RenderContext::new();
        let outer = Block::new(|ctx: &mut RenderContext, _: &Scope| {
            ctx.void_tag("f:textbox", &AttributeMap::new().with("name", "a"));
            ctx.element("f:block", &AttributeMap::new(), None, &Scope::default())
        });
        ctx.element("f:entry", &AttributeMap::new(), Some(outer), &Scope::default())
            .unwrap();
        assert_eq!(
            ctx.finish().unwrap(),
            r#"<f:entry><f:textbox name="a"/><f:block></f:block></f:entry>"#
        );
    }

    #[test]
    fn close_out_of_order_is_rejected() {
        let mut ctx = RenderContext::new();
        ctx.open_tag("a", &AttributeMap::new());
        ctx.open_tag("b", &AttributeMap::new());
        let err = ctx.close_tag("a").unwrap_err();
        assert_eq!(
            err,
            TagError::UnbalancedClose {
                expected: Some("b".to_string()),
                found: "a".to_string()
            }
        );
    }

    #[test]
    fn finish_reports_unclosed_elements() {
        let mut ctx = RenderContext::new();
        ctx.open_tag("j:jelly", &AttributeMap::new());
        assert_eq!(
            ctx.finish().unwrap_err(),
            TagError::UnclosedTags(vec!["j:jelly".to_string()])
        );
    }

    #[test]
    fn io_write_appends_text() {
        use std::io::Write;

        let mut ctx = RenderContext::new();
        write!(ctx, "hello {}", "world").unwrap();
        assert_eq!(ctx.as_str(), "hello world");
        assert!(ctx.write(&[0xff, 0xfe]).is_err());
    }
}
