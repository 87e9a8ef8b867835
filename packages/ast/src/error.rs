use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected character at {pos}")]
    UnexpectedChar { pos: usize },

    #[error("Unbalanced '{delimiter}' at {pos}")]
    Unbalanced { pos: usize, delimiter: char },

    #[error("Expected exactly one statement, found {found}")]
    StatementCount { found: usize },
}

impl ParseError {
    pub fn unexpected_char(pos: usize) -> Self {
        Self::UnexpectedChar { pos }
    }

    pub fn unbalanced(pos: usize, delimiter: char) -> Self {
        Self::Unbalanced { pos, delimiter }
    }
}
