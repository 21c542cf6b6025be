use thiserror::Error;

pub type MarkupResult<T> = Result<T, MarkupError>;

#[derive(Error, Debug, Clone)]
pub enum MarkupError {
    #[error("No content: the document has no element children")]
    NoContent,

    #[error("Unexpected end of input at {pos}")]
    UnexpectedEof { pos: usize },

    #[error("Invalid markup at {pos}: {message}")]
    InvalidSyntax { pos: usize, message: String },
}

impl MarkupError {
    pub fn invalid_syntax(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            pos,
            message: message.into(),
        }
    }
}
