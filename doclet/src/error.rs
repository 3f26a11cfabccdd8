use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Anything that can be recovered from is a warning on the
/// [`Reporter`](crate::diagnostics::Reporter) instead.
#[derive(Error, Debug)]
pub enum DocletError {
    #[error("failed to read model {path}: {source}")]
    ReadModel {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid model {path}: {source}")]
    ParseModel {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("error fetching URL: {url}: {reason}")]
    FetchPackageList { url: String, reason: String },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
