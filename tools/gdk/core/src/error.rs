use thiserror::Error;

/// Unrecoverable failures: broken assets, missing devices, exhausted memory.
///
/// Nothing in this crate retries or tolerates these. Binaries are expected to
/// propagate them out of `main` and exit.
#[derive(Error, Debug)]
pub enum GdkError {
    #[error("Can't allocate memory for {0}")]
    Allocation(&'static str),
    #[error("Invalid image format: {0}")]
    InvalidImage(String),
    #[error("Truncated image data: {0}")]
    TruncatedImage(&'static str),
    #[error("Invalid wave file: {0}")]
    InvalidWave(String),
    #[error("Display error: {0}")]
    Display(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, GdkError>;
