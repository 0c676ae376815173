use thiserror::Error;

/// Errors surfaced by payload validation and input readers.
#[derive(Debug, Error)]
pub enum ScvError {
    #[error("invalid hex color '{0}'")]
    InvalidColor(String),

    #[error("invalid job: {0}")]
    InvalidJob(String),

    #[error("malformed FASTA header: {0}")]
    MalformedFasta(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
