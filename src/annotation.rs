use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// A tagged PHI span in a document.
///
/// `start` and `end` are half-open character offsets into the original text. Equality and
/// hashing ignore `ann_id`, so two annotations of the same span, tag and document are
/// interchangeable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub tag: String,
    #[serde(default)]
    pub doc_id: String,
    #[serde(default)]
    pub ann_id: String,
}

impl Annotation {
    pub fn new(text: impl Into<String>, start: usize, end: usize, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            tag: tag.into(),
            doc_id: String::new(),
            ann_id: String::new(),
        }
    }

    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = doc_id.into();
        self
    }

    pub fn with_ann_id(mut self, ann_id: impl Into<String>) -> Self {
        self.ann_id = ann_id.into();
        self
    }

    /// Number of characters covered by the span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks `0 <= start < end <= len(text)` and that the span reproduces `self.text`.
    pub fn check_span(&self, chars: &[char]) -> Result<(), DocumentError> {
        if self.start >= self.end || self.end > chars.len() {
            return Err(DocumentError::OutOfBounds {
                annotation: self.clone(),
                len: chars.len(),
            });
        }

        let found: String = chars[self.start..self.end].iter().collect();
        if found != self.text {
            return Err(DocumentError::SpanMismatch {
                annotation: self.clone(),
                found,
            });
        }

        Ok(())
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.start == other.start
            && self.end == other.end
            && self.tag == other.tag
            && self.doc_id == other.doc_id
    }
}

impl Eq for Annotation {}

impl Hash for Annotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.start.hash(state);
        self.end.hash(state);
        self.tag.hash(state);
        self.doc_id.hash(state);
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Annotation(text='{}', start={}, end={}, tag='{}', doc_id='{}', ann_id='{}')",
            self.text, self.start, self.end, self.tag, self.doc_id, self.ann_id
        )
    }
}
