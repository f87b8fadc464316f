//! Optional extension tags declared in `jellyforge.yaml`.
//!
//! The file is looked for at the root of the template tree. When absent,
//! nothing changes; when present, its tags are registered next to the
//! built-ins and may not replace any of them.
//!
//! ```yaml
//! tags:
//!   - name: password
//!     kind: field
//!     defaults:
//!       class: secret
//!   - name: nested
//!     kind: block
//!     required: [title]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::attrs::{AttrValue, AttributeMap};
use crate::convention::element_name;
use crate::error::{io_err, ExtensionError};
use crate::ops::{ElementTag, FieldTag, Param, FORM_NS};
use crate::registry::TagRegistry;
use crate::tag::{TagOp, TagShape};

/// File name probed at the template root.
pub const EXTENSION_FILE: &str = "jellyforge.yaml";

/// Top-level shape of the extension file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionFile {
    #[serde(default)]
    pub tags: Vec<TagDef>,
}

/// One declared tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagDef {
    pub name: String,
    pub kind: TagKind,
    /// Bound-value attribute of a `field` tag (default `value`).
    #[serde(default)]
    pub value_attr: Option<String>,
    /// Element name; derived from `name` in the form namespace when absent.
    #[serde(default)]
    pub element: Option<String>,
    /// Arguments that must be supplied (block and void tags).
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub defaults: BTreeMap<String, Scalar>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Field,
    Block,
    Void,
}

/// Attribute values allowed in `defaults`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<&Scalar> for AttrValue {
    fn from(s: &Scalar) -> Self {
        match s {
            Scalar::Bool(b) => AttrValue::from(*b),
            Scalar::Int(n) => AttrValue::from(*n),
            Scalar::Float(n) => AttrValue::from(*n),
            Scalar::Str(s) => AttrValue::from(s.as_str()),
        }
    }
}

impl TagDef {
    fn element_name(&self) -> String {
        self.element
            .clone()
            .unwrap_or_else(|| element_name(FORM_NS, &self.name))
    }

    /// Validate and build the operation.
    pub fn into_op(self) -> Result<Arc<dyn TagOp>, ExtensionError> {
        if !is_identifier(&self.name) {
            return Err(self.invalid("name must be an identifier ([A-Za-z_][A-Za-z0-9_]*)"));
        }
        let element = self.element_name();
        if !is_element_name(&element) {
            return Err(self.invalid(&format!("'{element}' is not a valid element name")));
        }
        let defaults: AttributeMap = self
            .defaults
            .iter()
            .map(|(k, v)| (k.as_str(), AttrValue::from(v)))
            .collect();

        let op: Arc<dyn TagOp> = match self.kind {
            TagKind::Field => {
                if !self.required.is_empty() {
                    return Err(self.invalid("field tags take `name` only; drop `required`"));
                }
                let value_attr = self.value_attr.as_deref().unwrap_or("value");
                if value_attr == "name" {
                    return Err(self.invalid("`value_attr` cannot be `name`, which holds the field name"));
                }
                Arc::new(
                    FieldTag::new(&self.name, value_attr)
                        .element_override(&element)
                        .defaults(defaults),
                )
            }
            TagKind::Block | TagKind::Void => {
                if self.value_attr.is_some() {
                    return Err(self.invalid("`value_attr` only applies to field tags"));
                }
                let shape = if self.kind == TagKind::Block {
                    TagShape::Block
                } else {
                    TagShape::Void
                };
                let tag = self
                    .required
                    .iter()
                    .fold(ElementTag::with_element(&self.name, &element, shape), |tag, arg| {
                        tag.param(Param::required(arg))
                    });
                Arc::new(tag.defaults(defaults))
            }
        };
        Ok(op)
    }

    fn invalid(&self, reason: &str) -> ExtensionError {
        ExtensionError::Invalid {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Path of the extension file for `root`.
pub fn extension_path(root: &Path) -> PathBuf {
    root.join(EXTENSION_FILE)
}

/// Parse an extension file.
pub fn load(path: &Path) -> Result<ExtensionFile, ExtensionError> {
    let raw = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&raw).map_err(|source| ExtensionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `root/jellyforge.yaml` if it exists.
pub fn detect(root: &Path) -> Result<Option<ExtensionFile>, ExtensionError> {
    let path = extension_path(root);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no extension file");
        return Ok(None);
    }
    let file = load(&path)?;
    tracing::info!(path = %path.display(), tags = file.tags.len(), "loaded extension tags");
    Ok(Some(file))
}

/// Register every tag of `file`. Returns how many were added.
pub fn register_all(registry: &mut TagRegistry, file: ExtensionFile) -> Result<usize, ExtensionError> {
    let count = file.tags.len();
    for def in file.tags {
        registry.register(def.into_op()?)?;
    }
    Ok(count)
}

/// Built-ins plus whatever `root` declares.
pub fn registry_for_root(root: &Path) -> Result<TagRegistry, ExtensionError> {
    let mut registry = TagRegistry::with_builtins();
    if let Some(file) = detect(root)? {
        register_all(&mut registry, file)?;
    }
    Ok(registry)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Non-empty, no markup characters, and no empty prefix or local part
/// around a `:`.
fn is_element_name(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(':')
        && !s.ends_with(':')
        && !s
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '"' | '\'' | '='))
}
