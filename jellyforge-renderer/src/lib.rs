//! # jellyforge-renderer
//!
//! Evaluates tera templates in which the jellyforge tag operations are
//! callable as functions and filter sections.
//!
//! ## Usage
//!
//! ```rust
//! use jellyforge_renderer::{TemplateContext, TemplateEngine};
//!
//! let engine = TemplateEngine::with_builtins();
//! let vars = TemplateContext::new("config.jelly.tera", "config.jelly");
//! let out = engine
//!     .render("config.jelly.tera", r#"{{ textbox(name="foo") }}"#, &vars)
//!     .unwrap();
//! assert_eq!(out, r#"<f:textbox name="foo" value="${instance.foo}"/>"#);
//! ```

pub mod bridge;
pub mod context;
pub mod engine;
pub mod error;

pub use context::TemplateContext;
pub use engine::TemplateEngine;
pub use error::RenderError;
