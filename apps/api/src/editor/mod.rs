// Editing surface: the document the suggestion controller works against,
// plus the in-memory sessions that host one controller each.

pub mod handlers;
pub mod session;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("document is locked while a suggestion request is in flight")]
    Locked,
}

/// What the suggestion controller needs from an editor. Synchronous and
/// infallible: controller writes always go through.
pub trait EditingSurface {
    fn content(&self) -> &str;
    fn set_content(&mut self, content: String);
    fn set_editable(&mut self, editable: bool);
}

/// Markup document held in memory.
#[derive(Debug, Clone)]
pub struct Document {
    content: String,
    editable: bool,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            editable: true,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// A user edit. Rejected while the surface is locked.
    pub fn edit(&mut self, content: String) -> Result<(), EditorError> {
        if !self.editable {
            return Err(EditorError::Locked);
        }
        self.content = content;
        Ok(())
    }
}

impl EditingSurface for Document {
    fn content(&self) -> &str {
        &self.content
    }

    fn set_content(&mut self, content: String) {
        self.content = content;
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_when_editable() {
        let mut doc = Document::new("<p>A</p>");
        doc.edit("<p>B</p>".to_string()).unwrap();
        assert_eq!(doc.content(), "<p>B</p>");
    }

    #[test]
    fn test_edit_rejected_when_locked() {
        let mut doc = Document::new("<p>A</p>");
        doc.set_editable(false);
        assert!(matches!(doc.edit("<p>B</p>".to_string()), Err(EditorError::Locked)));
        assert_eq!(doc.content(), "<p>A</p>");
    }

    #[test]
    fn test_set_content_ignores_lock() {
        let mut doc = Document::new("<p>A</p>");
        doc.set_editable(false);
        doc.set_content("<p>B</p>".to_string());
        assert_eq!(doc.content(), "<p>B</p>");
    }
}
