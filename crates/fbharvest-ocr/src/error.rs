use std::path::PathBuf;

use thiserror::Error;

/// Recognized text did not have the shape of a reaction bar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("buttons' text is missing")]
    MissingButtons,

    #[error("could not read shares count")]
    UnreadableShares,

    #[error("more than one shares value")]
    AmbiguousShares,

    #[error("could not read comment count")]
    UnreadableComments,

    #[error("more than one comment value")]
    AmbiguousComments,

    #[error("unexpected characters in place of likes")]
    UnexpectedLikes,
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to run recognizer {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("recognizer failed on {path} ({status}): {stderr}")]
    Recognizer {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid unit pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Store(#[from] fbharvest_store::StoreError),
}
