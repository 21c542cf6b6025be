use thiserror::Error;

pub type ScriptResult<T> = Result<T, ScriptError>;

#[derive(Error, Debug, Clone)]
pub enum ScriptError {
    #[error("No return tree found")]
    NoReturnTree,

    #[error("Return tree has no renderable content")]
    EmptyTree,

    #[error("Unexpected end of input at {pos}")]
    UnexpectedEof { pos: usize },

    #[error("Invalid element syntax at {pos}: {message}")]
    InvalidSyntax { pos: usize, message: String },
}

impl ScriptError {
    pub fn invalid_syntax(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            pos,
            message: message.into(),
        }
    }
}
