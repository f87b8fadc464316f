//! Append-only output buffer.

use std::fmt;

/// Text accumulated by one render.
///
/// There is no API to remove or rewrite content: the buffer only grows, and
/// is read once via [`OutputBuffer::into_string`].
#[derive(Debug, Default)]
pub struct OutputBuffer {
    text: String,
    fragments: usize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.text.push_str(fragment);
        self.fragments += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of non-empty fragments appended so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Write for OutputBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}
