use std::path::PathBuf;

use thiserror::Error;

use crate::annotation::Annotation;

/// Why a single annotation could not be given a surrogate.
///
/// Generators turn these into a `None` surrogate; they never abort a batch.
#[derive(Debug, Error)]
pub enum SurrogateError {
    #[error("could not parse date '{value}' with locales {locales}")]
    UnparseableDate { value: String, locales: String },

    #[error("date '{0}' cannot be shifted within the supported calendar range")]
    DateOutOfRange(String),

    #[error("not a valid phone number: '{0}'")]
    InvalidPhoneNumber(String),

    #[error("could not parse name '{0}'")]
    UnparseableName(String),

    #[error("no character mapping for initial '{0}'")]
    UnmappedInitial(char),

    #[error("no reference names start with '{0}'")]
    EmptyNameBucket(char),

    #[error("reference table '{0}' is empty")]
    EmptyReferenceTable(&'static str),

    #[error("surrogate for '{0}' is identical to the original")]
    Unchanged(String),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("annotation {annotation} is out of bounds for a document of {len} characters")]
    OutOfBounds { annotation: Annotation, len: usize },

    #[error("annotation {annotation} does not match document text '{found}'")]
    SpanMismatch { annotation: Annotation, found: String },

    #[error("tag '{tag}' has {expected} annotations but {actual} surrogates were given")]
    SurrogateCountMismatch {
        tag: String,
        expected: usize,
        actual: usize,
    },

    #[error("surrogates for tag '{0}' were already added")]
    DuplicateSurrogates(String),

    #[error("document has no annotations with tag '{0}'")]
    UnknownTag(String),
}

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("no valid surrogate for {0}")]
    MissingSurrogate(Annotation),

    #[error("{annotations} annotations but {surrogates} surrogates")]
    LengthMismatch { annotations: usize, surrogates: usize },

    #[error("annotation {0} starts before the end of the previous annotation")]
    Unsorted(Annotation),

    #[error("annotation {annotation} is out of bounds for a text of {len} characters")]
    OutOfBounds { annotation: Annotation, len: usize },
}

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference table {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed reference table {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("surrogate table I/O failed")]
    Csv(#[from] csv::Error),

    #[error("surrogate table I/O failed")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum BratError {
    #[error("failed to access brat file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),
}
