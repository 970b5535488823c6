//! Error types for the vocabulary pipeline.

use std::path::PathBuf;

/// Underlying cause of a fetch failure (connection, HTTP status, or I/O).
pub type FetchCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for vocabulary processing.
///
/// `Fetch`, `FormatUnresolved`, `Parse`, and `UnnamedVocabulary` are fatal to
/// a run: a missing or unreadable vocabulary makes downstream resolution
/// meaningless. `Write` is recoverable per vocabulary: the run reports it
/// and continues with the next entry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network or I/O failure while resolving a locator. Never retried.
    #[error("failed to fetch vocabulary {locator}")]
    Fetch {
        /// Locator that failed to resolve.
        locator: String,
        /// Underlying connection or I/O error.
        #[source]
        source: FetchCause,
    },

    /// No serialization format could be determined and no fallback is
    /// configured.
    #[error("no serialization format could be determined for {locator}")]
    FormatUnresolved {
        /// Locator whose format is unknown.
        locator: String,
    },

    /// The statement-stream producer rejected the document.
    #[error("failed to parse vocabulary {locator}: {message}")]
    Parse {
        /// Locator of the malformed document.
        locator: String,
        /// Producer's diagnostic.
        message: String,
    },

    /// Neither the caller nor the document produced a prefix, so no output
    /// file name can be derived.
    #[error("vocabulary {locator} has no prefix; supply one or add vann metadata")]
    UnnamedVocabulary {
        /// Locator of the anonymous vocabulary.
        locator: String,
    },

    /// An output file could not be created or written.
    #[error("failed to write {path}")]
    Write {
        /// Target path of the failed write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for vocabulary processing operations.
pub type Result<T> = std::result::Result<T, Error>;
