//! Surrogate generation for de-identified clinical text.
//!
//! Annotated PHI spans are replaced by realistic but fabricated values: names are swapped for
//! other real names with consistently remapped initials, dates are shifted by a per-document
//! offset, addresses are rebuilt from a reference table, and so on. The pipeline has two steps.
//! [`DatasetDeidentifier`] generates one surrogate per annotation, and [`apply_surrogates`]
//! splices them into the text, moving every annotation to its new offsets.

pub mod annotation;
pub mod brat;
pub mod config;
pub mod deidentifier;
pub mod document;
pub mod error;
pub mod generators;
pub mod logging;
pub mod random;
pub mod reference;
pub mod rewrite;
pub mod table;

pub use annotation::Annotation;
pub use config::{DateConfig, SurrogateConfig};
pub use deidentifier::DatasetDeidentifier;
pub use document::{DocumentSurrogates, SurrogateDocument};
pub use error::{BratError, DocumentError, RewriteError, SurrogateError, TableError};
pub use generators::{GeneratorKind, SurrogateGenerator, TagGeneratorRegistry};
pub use random::{RandomData, RandomSource};
pub use reference::ReferenceData;
pub use rewrite::{apply_surrogates, mask_annotations, ErrorPolicy, RewrittenDocument};

/// Generates surrogates for `documents` with the built-in reference tables and default options.
pub fn generate_surrogates(
    documents: Vec<SurrogateDocument>,
    seed: u64,
) -> Result<Vec<DocumentSurrogates>, DocumentError> {
    DatasetDeidentifier::new(seed, ReferenceData::builtin()).generate_surrogates(documents)
}
