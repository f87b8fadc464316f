//! Tag operations: the generic element shapes plus the built-in vocabulary.

pub mod builtin;
pub mod element;
pub mod field;
pub mod iteration;

pub use builtin::{builtins, VIEW_NAMESPACES};
pub use element::{ElementTag, Param, ParamDefault};
pub use field::FieldTag;
pub use iteration::{ForEach, OptionsFor};

/// Form taglib namespace prefix.
pub const FORM_NS: &str = "f";
/// Jelly core namespace prefix.
pub const CORE_NS: &str = "j";
