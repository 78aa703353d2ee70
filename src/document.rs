use std::collections::HashMap;

use crate::annotation::Annotation;
use crate::error::DocumentError;

/// A document's text and annotations, grouped by tag.
///
/// Tags are kept in order of first appearance so a run visits them deterministically.
#[derive(Debug, Clone)]
pub struct SurrogateDocument {
    name: String,
    text: String,
    annotations: Vec<Annotation>,
    tags: Vec<String>,
    by_tag: HashMap<String, Vec<usize>>,
}

impl SurrogateDocument {
    /// Fails when an annotation does not match the text it points into.
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        annotations: Vec<Annotation>,
    ) -> Result<Self, DocumentError> {
        let text = text.into();
        let chars: Vec<char> = text.chars().collect();

        let mut tags = Vec::new();
        let mut by_tag: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, annotation) in annotations.iter().enumerate() {
            annotation.check_span(&chars)?;

            let positions = by_tag.entry(annotation.tag.clone()).or_insert_with(|| {
                tags.push(annotation.tag.clone());
                Vec::new()
            });
            positions.push(i);
        }

        Ok(Self {
            name: name.into(),
            text,
            annotations,
            tags,
            by_tag,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn all_annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Annotations of `tag` in document order; empty for unknown tags.
    pub fn annotations(&self, tag: &str) -> Vec<&Annotation> {
        self.by_tag
            .get(tag)
            .map(|positions| positions.iter().map(|&i| &self.annotations[i]).collect())
            .unwrap_or_default()
    }

    /// Texts of the annotations of `tag`, duplicates included.
    pub fn annotations_text(&self, tag: &str) -> Vec<&str> {
        self.annotations(tag)
            .into_iter()
            .map(|annotation| annotation.text.as_str())
            .collect()
    }
}

/// A document together with the surrogates generated for it so far.
#[derive(Debug, Clone)]
pub struct DocumentSurrogates {
    document: SurrogateDocument,
    surrogates: HashMap<String, Vec<Option<String>>>,
}

impl DocumentSurrogates {
    pub fn new(document: SurrogateDocument) -> Self {
        Self {
            document,
            surrogates: HashMap::new(),
        }
    }

    /// Attaches the surrogates of one tag, parallel to `document.annotations(tag)`.
    /// Each tag can be given surrogates once.
    pub fn with_surrogates(
        mut self,
        tag: &str,
        surrogates: Vec<Option<String>>,
    ) -> Result<Self, DocumentError> {
        let expected = self.document.annotations(tag).len();
        if expected == 0 {
            return Err(DocumentError::UnknownTag(tag.to_string()));
        }
        if self.surrogates.contains_key(tag) {
            return Err(DocumentError::DuplicateSurrogates(tag.to_string()));
        }
        if surrogates.len() != expected {
            return Err(DocumentError::SurrogateCountMismatch {
                tag: tag.to_string(),
                expected,
                actual: surrogates.len(),
            });
        }

        self.surrogates.insert(tag.to_string(), surrogates);
        Ok(self)
    }

    pub fn document(&self) -> &SurrogateDocument {
        &self.document
    }

    pub fn surrogates(&self, tag: &str) -> Option<&[Option<String>]> {
        self.surrogates.get(tag).map(Vec::as_slice)
    }

    /// Every annotation with its surrogate, sorted by start offset. Annotations of tags without
    /// surrogates pair with `None`.
    pub fn annotation_surrogate_pairs(&self) -> Vec<(&Annotation, Option<&str>)> {
        let mut pairs = Vec::with_capacity(self.document.annotations.len());

        for tag in self.document.tags() {
            let surrogates = self.surrogates(tag).unwrap_or_default();
            for (i, annotation) in self.document.annotations(tag).into_iter().enumerate() {
                let surrogate = surrogates.get(i).and_then(|s| s.as_deref());
                pairs.push((annotation, surrogate));
            }
        }

        pairs.sort_by_key(|(annotation, _)| annotation.start);
        pairs
    }
}
