//! Error types for jellyforge-renderer.

use std::error::Error as StdError;

use thiserror::Error;

use jellyforge_core::TagError;

/// All errors that can arise from evaluating a template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error outside any one template (context building).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// The template failed to parse or raised while rendering.
    #[error("template '{template}' failed: {message}")]
    Evaluation {
        template: String,
        /// The engine's full error chain, flattened.
        message: String,
    },

    /// A tag operation called from the template rejected its arguments.
    #[error("template '{template}': {source}")]
    Tag {
        template: String,
        #[source]
        source: TagError,
    },
}

impl RenderError {
    /// Classify an engine error raised while handling `template`.
    ///
    /// Tag errors travel through tera as error sources; when one is found in
    /// the chain it is surfaced as [`RenderError::Tag`].
    pub fn from_tera(template: &str, err: tera::Error) -> Self {
        let mut current: Option<&(dyn StdError + 'static)> = Some(&err);
        while let Some(e) = current {
            if let Some(tag) = e.downcast_ref::<TagError>() {
                return RenderError::Tag {
                    template: template.to_string(),
                    source: tag.clone(),
                };
            }
            current = e.source();
        }
        RenderError::Evaluation {
            template: template.to_string(),
            message: flatten_chain(&err),
        }
    }

    /// `true` when a tag operation received a value it cannot emit.
    pub fn is_invalid_attribute(&self) -> bool {
        matches!(
            self,
            RenderError::Tag {
                source: TagError::InvalidAttributeValue { .. },
                ..
            }
        )
    }
}

fn flatten_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        parts.push(e.to_string());
        current = e.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_error_is_found_in_chain() {
        let inner = tera::Error::chain("Function call 'textbox' failed", TagError::missing("textbox", "name"));
        let outer = tera::Error::chain("Failed to render 'a.jelly.tera'", inner);
        let err = RenderError::from_tera("a.jelly.tera", outer);
        assert!(
            matches!(err, RenderError::Tag { source: TagError::MissingArgument { .. }, .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn other_errors_keep_the_whole_chain() {
        let inner = tera::Error::msg("Variable `nope` not found");
        let outer = tera::Error::chain("Failed to render 'b.tera'", inner);
        let err = RenderError::from_tera("b.tera", outer);
        match err {
            RenderError::Evaluation { template, message } => {
                assert_eq!(template, "b.tera");
                assert!(message.contains("Failed to render"));
                assert!(message.contains("nope"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
