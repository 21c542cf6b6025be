use thiserror::Error;

pub type FigmaResult<T> = Result<T, FigmaError>;

/// Transport failures keep the upstream status so callers can display it;
/// structural mapping failures are a separate kind.
#[derive(Error, Debug)]
pub enum FigmaError {
    #[error("Invalid file URL: no file key found in '{url}'")]
    InvalidFileUrl { url: String },

    #[error("Design service returned status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("Design service request failed: {0}")]
    Network(String),

    #[error("Invalid design document: {0}")]
    InvalidDocument(String),

    #[error("Frame '{0}' not found in document")]
    FrameNotFound(String),

    #[error("Document has no importable frames")]
    EmptyDocument,
}
