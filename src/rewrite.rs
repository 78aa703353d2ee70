//! Rewrites a document by splicing surrogates into the annotated spans.
//!
//! Offsets are character offsets into the original text. The rewritten annotations carry the
//! offsets of their replacement in the rewritten text.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::error::RewriteError;

/// What to do with an annotation that has no usable surrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the rewrite.
    #[default]
    Raise,
    /// Keep the original text and report the annotation.
    Ignore,
    /// Substitute `[Tag]` and report the annotation.
    Coerce,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenDocument {
    pub text: String,
    /// One entry per input annotation, moved to its position in `text`.
    pub annotations: Vec<Annotation>,
    /// Input annotations that kept their original text or got a placeholder.
    pub annotations_without_surrogate: Vec<Annotation>,
}

/// Replaces each annotation with its surrogate.
///
/// `annotations` must be sorted by start and must not overlap. `surrogates` is parallel to
/// `annotations`; `None` and empty strings count as missing and are handled per `errors`.
pub fn apply_surrogates<S: AsRef<str>>(
    text: &str,
    annotations: &[Annotation],
    surrogates: &[Option<S>],
    errors: ErrorPolicy,
) -> Result<RewrittenDocument, RewriteError> {
    if annotations.len() != surrogates.len() {
        return Err(RewriteError::LengthMismatch {
            annotations: annotations.len(),
            surrogates: surrogates.len(),
        });
    }

    let chars: Vec<char> = text.chars().collect();
    let mut rewritten = String::with_capacity(text.len());
    let mut adjusted = Vec::with_capacity(annotations.len());
    let mut without_surrogate = Vec::new();

    // Signed drift between original and rewritten offsets.
    let mut shift: isize = 0;
    let mut cursor = 0;

    for (annotation, surrogate) in annotations.iter().zip(surrogates) {
        if annotation.start >= annotation.end || annotation.end > chars.len() {
            return Err(RewriteError::OutOfBounds {
                annotation: annotation.clone(),
                len: chars.len(),
            });
        }
        if annotation.start < cursor {
            return Err(RewriteError::Unsorted(annotation.clone()));
        }

        let replacement = match surrogate.as_ref().map(|s| s.as_ref()) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                let fallback = match errors {
                    ErrorPolicy::Raise => {
                        return Err(RewriteError::MissingSurrogate(annotation.clone()))
                    }
                    ErrorPolicy::Ignore => chars[annotation.start..annotation.end].iter().collect(),
                    ErrorPolicy::Coerce => format!("[{}]", annotation.tag),
                };
                without_surrogate.push(annotation.clone());
                fallback
            }
        };

        rewritten.extend(&chars[cursor..annotation.start]);
        rewritten.push_str(&replacement);

        let replacement_len = replacement.chars().count();
        let start = (annotation.start as isize + shift) as usize;
        shift += replacement_len as isize - annotation.len() as isize;
        cursor = annotation.end;

        adjusted.push(Annotation {
            text: replacement,
            start,
            end: start + replacement_len,
            tag: annotation.tag.clone(),
            doc_id: annotation.doc_id.clone(),
            ann_id: annotation.ann_id.clone(),
        });
    }

    rewritten.extend(&chars[cursor..]);

    Ok(RewrittenDocument {
        text: rewritten,
        annotations: adjusted,
        annotations_without_surrogate: without_surrogate,
    })
}

/// The default mask: the upper-cased tag in brackets.
pub fn tag_placeholder(annotation: &Annotation) -> String {
    format!("[{}]", annotation.tag.to_uppercase())
}

/// Replaces every annotation with the placeholder `formatter` produces for it.
/// Annotations may be given in any order.
pub fn mask_annotations<F>(
    text: &str,
    annotations: &[Annotation],
    formatter: F,
) -> Result<RewrittenDocument, RewriteError>
where
    F: Fn(&Annotation) -> String,
{
    let mut sorted = annotations.to_vec();
    sorted.sort_by_key(|annotation| (annotation.start, annotation.end));

    let placeholders: Vec<Option<String>> =
        sorted.iter().map(|annotation| Some(formatter(annotation))).collect();
    apply_surrogates(text, &sorted, &placeholders, ErrorPolicy::Raise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TEXT: &str = "ccc cc ccc c c ccc cccccc cccc";

    fn annotations() -> Vec<Annotation> {
        vec![
            Annotation::new("ccc", 0, 3, "A").with_ann_id("T1"),
            Annotation::new("cc", 4, 6, "A").with_ann_id("T2"),
            Annotation::new("ccc", 15, 18, "B").with_ann_id("T3"),
        ]
    }

    fn spans(annotations: &[Annotation]) -> Vec<(usize, usize)> {
        annotations.iter().map(|a| (a.start, a.end)).collect()
    }

    fn substring(text: &str, start: usize, end: usize) -> String {
        text.chars().skip(start).take(end - start).collect()
    }

    #[test]
    fn rewrites_text_and_shifts_spans() {
        let surrogates = [Some("a"), Some("dd"), Some("bbbbb")];
        let doc = apply_surrogates(TEXT, &annotations(), &surrogates, ErrorPolicy::Raise).unwrap();

        assert_eq!(doc.text, "a dd ccc c c bbbbb cccccc cccc");
        assert_eq!(spans(&doc.annotations), vec![(0, 1), (2, 4), (13, 18)]);
        assert_eq!(doc.annotations[2].text, "bbbbb");
        assert_eq!(doc.annotations[2].ann_id, "T3");
        assert!(doc.annotations_without_surrogate.is_empty());
    }

    #[test]
    fn raise_policy_names_the_annotation() {
        let surrogates = [Some("a"), None, Some("bbbbb")];
        let err = apply_surrogates(TEXT, &annotations(), &surrogates, ErrorPolicy::Raise)
            .unwrap_err();
        match err {
            RewriteError::MissingSurrogate(annotation) => assert_eq!(annotation.ann_id, "T2"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ignore_policy_keeps_original_span() {
        let surrogates = [Some("a"), None, Some("bbbbb")];
        let doc = apply_surrogates(TEXT, &annotations(), &surrogates, ErrorPolicy::Ignore).unwrap();

        assert_eq!(doc.text, "a cc ccc c c bbbbb cccccc cccc");
        assert_eq!(spans(&doc.annotations), vec![(0, 1), (2, 4), (13, 18)]);
        assert_eq!(doc.annotations[1].text, "cc");
        assert_eq!(doc.annotations_without_surrogate, vec![annotations()[1].clone()]);
    }

    #[test]
    fn coerce_policy_inserts_tag_placeholder() {
        let surrogates = [Some("a"), Some(""), Some("bbbbb")];
        let doc = apply_surrogates(TEXT, &annotations(), &surrogates, ErrorPolicy::Coerce).unwrap();

        assert_eq!(doc.text, "a [A] ccc c c bbbbb cccccc cccc");
        assert_eq!(spans(&doc.annotations), vec![(0, 1), (2, 5), (14, 19)]);
        assert_eq!(doc.annotations_without_surrogate.len(), 1);
    }

    #[test]
    fn rejects_malformed_input() {
        let err = apply_surrogates(TEXT, &annotations(), &[Some("a")], ErrorPolicy::Raise)
            .unwrap_err();
        assert!(matches!(
            err,
            RewriteError::LengthMismatch { annotations: 3, surrogates: 1 }
        ));

        let mut unsorted = annotations();
        unsorted.swap(0, 2);
        let surrogates = [Some("x"), Some("y"), Some("z")];
        let err = apply_surrogates(TEXT, &unsorted, &surrogates, ErrorPolicy::Raise).unwrap_err();
        assert!(matches!(err, RewriteError::Unsorted(_)));

        let beyond = [Annotation::new("cccc", 26, 31, "A")];
        let err = apply_surrogates(TEXT, &beyond, &[Some("x")], ErrorPolicy::Raise).unwrap_err();
        assert!(matches!(err, RewriteError::OutOfBounds { len: 30, .. }));
    }

    #[test]
    fn handles_adjacent_annotations_and_text_boundaries() {
        let text = "JanPiet";
        let annotations = [
            Annotation::new("Jan", 0, 3, "Name"),
            Annotation::new("Piet", 3, 7, "Name"),
        ];
        let doc = apply_surrogates(text, &annotations, &[Some("Kees"), Some("Ad")], ErrorPolicy::Raise)
            .unwrap();
        assert_eq!(doc.text, "KeesAd");
        assert_eq!(spans(&doc.annotations), vec![(0, 4), (4, 6)]);
    }

    #[test]
    fn offsets_count_characters() {
        let text = "Özlem en Zoë";
        let annotations = [
            Annotation::new("Özlem", 0, 5, "Name"),
            Annotation::new("Zoë", 9, 12, "Name"),
        ];
        let doc = apply_surrogates(text, &annotations, &[Some("Eva"), Some("Renée")], ErrorPolicy::Raise)
            .unwrap();
        assert_eq!(doc.text, "Eva en Renée");
        assert_eq!(spans(&doc.annotations), vec![(0, 3), (7, 12)]);
    }

    #[test]
    fn masks_unsorted_annotations() {
        let annotations = [
            Annotation::new("Utrecht", 21, 28, "Address"),
            Annotation::new("Jan van Dam", 0, 11, "Name"),
        ];
        let doc = mask_annotations(
            "Jan van Dam woont in Utrecht.",
            &annotations,
            tag_placeholder,
        )
        .unwrap();

        assert_eq!(doc.text, "[NAME] woont in [ADDRESS].");
        assert_eq!(spans(&doc.annotations), vec![(0, 6), (16, 25)]);
    }

    #[test]
    fn rewritten_spans_always_hold_their_surrogate() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let len = rng.gen_range(1..60);
            let text: String = (0..len).map(|_| rng.gen_range('a'..='e')).collect();

            let mut annotations = Vec::new();
            let mut surrogates = Vec::new();
            let mut position = 0;
            while position < len {
                let start = position + rng.gen_range(0..4);
                let end = start + rng.gen_range(1..5);
                if end > len {
                    break;
                }
                annotations.push(Annotation::new(substring(&text, start, end), start, end, "X"));
                let size = rng.gen_range(0..7);
                let surrogate: String = (0..size).map(|_| rng.gen_range('v'..='z')).collect();
                surrogates.push(Some(surrogate));
                position = end;
            }

            let doc = apply_surrogates(&text, &annotations, &surrogates, ErrorPolicy::Coerce)
                .unwrap();

            let mut expected_len = len as isize;
            for (original, adjusted) in annotations.iter().zip(&doc.annotations) {
                assert_eq!(substring(&doc.text, adjusted.start, adjusted.end), adjusted.text);
                expected_len += adjusted.len() as isize - original.len() as isize;
            }
            assert_eq!(doc.text.chars().count() as isize, expected_len);
        }
    }
}
