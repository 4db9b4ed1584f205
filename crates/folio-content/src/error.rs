use thiserror::Error;

use crate::domain::{CollectionKind, ContentDomain};

/// Why a content document could not be produced.
#[derive(Error, Debug)]
pub enum LoadCause {
    /// The backing file does not exist.
    #[error("document file is missing")]
    Missing,

    /// The file exists but could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON, or its shape does not match the document type.
    #[error("malformed content document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document parsed but failed validation.
    #[error("invalid content document: {0}")]
    Invalid(String),
}

/// A per-domain accessor failed. Never masked into default content.
#[derive(Error, Debug)]
#[error("content document `{domain}` could not be loaded: {cause}")]
pub struct ContentLoadError {
    pub domain: ContentDomain,
    #[source]
    pub cause: LoadCause,
}

impl ContentLoadError {
    pub fn new(domain: ContentDomain, cause: impl Into<LoadCause>) -> Self {
        Self {
            domain,
            cause: cause.into(),
        }
    }
}

/// Errors produced by writes and by the slug-addressed collections.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Load(#[from] ContentLoadError),

    /// Rejected before anything was written.
    #[error("invalid {what}: {reason}")]
    Invalid { what: String, reason: String },

    #[error("{kind} `{slug}` not found")]
    NotFound { kind: CollectionKind, slug: String },

    #[error("{kind} `{slug}` already exists")]
    Conflict { kind: CollectionKind, slug: String },

    #[error("collection `{kind}` is malformed: {source}")]
    MalformedCollection {
        kind: CollectionKind,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_names_the_domain() {
        let err = ContentLoadError::new(ContentDomain::Hometown, LoadCause::Missing);
        assert_eq!(
            err.to_string(),
            "content document `hometown` could not be loaded: document file is missing"
        );
    }
}
