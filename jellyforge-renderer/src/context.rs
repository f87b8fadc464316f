//! Variables visible to every template.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Values every template can read, e.g. `{{ template }}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateContext {
    /// Source path relative to the template root.
    pub template: String,
    /// Destination path relative to the template root.
    pub output: String,
    /// `jellyforge <version>`.
    pub generator: String,
}

impl TemplateContext {
    pub fn new(template: impl Into<String>, output: impl Into<String>) -> Self {
        TemplateContext {
            template: template.into(),
            output: output.into(),
            generator: format!("jellyforge {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
