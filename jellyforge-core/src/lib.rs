//! # jellyforge-core
//!
//! The tag-builder DSL behind jellyforge templates: attribute encoding,
//! naming-convention defaults, the per-render output context, and the
//! registry of tag operations.
//!
//! ## Usage
//!
//! ```rust
//! use jellyforge_core::{Block, RenderContext, Scope, TagCall, TagRegistry};
//!
//! let registry = TagRegistry::with_builtins();
//! let mut ctx = RenderContext::new();
//! let body = Block::new(|ctx: &mut RenderContext, _: &Scope| {
//!     registry.emit(ctx, "textbox", TagCall::new().arg("name", "foo.bar"), None)
//! });
//! registry
//!     .emit(&mut ctx, "section", TagCall::new().arg("title", "Options"), Some(body))
//!     .unwrap();
//! assert_eq!(
//!     ctx.finish().unwrap(),
//!     r#"<f:section title="Options"><f:textbox name="foo.bar" value="${instance.bar}"/></f:section>"#
//! );
//! ```

pub mod attrs;
pub mod buffer;
pub mod context;
pub mod convention;
pub mod error;
pub mod extension;
pub mod ops;
pub mod registry;
pub mod tag;

pub use attrs::{encode, AttrValue, AttributeMap};
pub use buffer::OutputBuffer;
pub use context::{Block, RenderContext, Scope};
pub use error::{ExtensionError, TagError};
pub use registry::TagRegistry;
pub use tag::{TagCall, TagOp, TagShape};
