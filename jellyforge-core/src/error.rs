//! Error types for jellyforge-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while emitting tags into a render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// A required argument was not supplied to a tag operation.
    #[error("tag '{tag}' requires argument '{argument}'")]
    MissingArgument { tag: String, argument: String },

    /// An argument could not be turned into an attribute value.
    #[error("tag '{tag}': attribute '{attribute}' has a non-representable value ({reason})")]
    InvalidAttributeValue {
        tag: String,
        attribute: String,
        reason: String,
    },

    /// No operation is registered under this name.
    #[error("unknown tag operation '{0}'")]
    UnknownTag(String),

    /// An operation with this name is already registered.
    #[error("tag operation '{0}' is already registered")]
    DuplicateTag(String),

    /// A close was requested for an element that is not the innermost open one.
    #[error("cannot close <{found}>: innermost open element is {expected:?}")]
    UnbalancedClose {
        expected: Option<String>,
        found: String,
    },

    /// The render finished with elements still open.
    #[error("render finished with unclosed elements: {}", .0.join(", "))]
    UnclosedTags(Vec<String>),

    /// A nested block was supplied to a self-closing element.
    #[error("tag '{0}' is self-closing and takes no nested block")]
    UnexpectedBody(String),

    /// Bytes written into the output buffer were not valid UTF-8.
    #[error("output buffer received invalid UTF-8")]
    InvalidUtf8,
}

impl TagError {
    pub fn missing(tag: &str, argument: &str) -> Self {
        TagError::MissingArgument {
            tag: tag.to_string(),
            argument: argument.to_string(),
        }
    }

    pub fn invalid_value(tag: &str, attribute: &str, reason: impl Into<String>) -> Self {
        TagError::InvalidAttributeValue {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading extension tag definitions.
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The extension file exists but could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extension file is not valid YAML for the expected shape.
    #[error("failed to parse extension file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A definition is structurally wrong (bad name, bad element).
    #[error("invalid extension tag '{name}': {reason}")]
    Invalid { name: String, reason: String },

    /// Registration failed (typically a name clash with a built-in).
    #[error("extension tag rejected: {0}")]
    Registration(#[from] TagError),
}

/// Convenience constructor for [`ExtensionError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ExtensionError {
    ExtensionError::Io {
        path: path.into(),
        source,
    }
}
