use std::fmt;

/// A zero-based byte position in the source text, with a derived line/column
/// for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum LexError {
    #[error("{position}: unterminated single-quoted string")]
    UnterminatedSingleQuote { position: Position },
    #[error("{position}: unterminated double-quoted string")]
    UnterminatedDoubleQuote { position: Position },
    #[error("{position}: unterminated command substitution")]
    UnterminatedCommandSubstitution { position: Position },
    #[error("{position}: unterminated parameter expansion")]
    UnterminatedParameterExpansion { position: Position },
    #[error("{position}: unterminated arithmetic expansion")]
    UnterminatedArithmeticExpansion { position: Position },
    #[error("{position}: unterminated backquoted string")]
    UnterminatedBackquote { position: Position },
    #[error("{position}: heredoc delimiter `{delimiter}` not found before end of input")]
    UnterminatedHereDoc { position: Position, delimiter: String },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedSingleQuote { position }
            | LexError::UnterminatedDoubleQuote { position }
            | LexError::UnterminatedCommandSubstitution { position }
            | LexError::UnterminatedParameterExpansion { position }
            | LexError::UnterminatedArithmeticExpansion { position }
            | LexError::UnterminatedBackquote { position }
            | LexError::UnterminatedHereDoc { position, .. } => *position,
        }
    }
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("{position}: expected {expected}, found {found}")]
    UnexpectedToken {
        position: Position,
        expected: String,
        found: String,
    },
    #[error("{position}: unexpected end of input, expected {expected}")]
    UnexpectedEof { position: Position, expected: String },
    #[error("{position}: empty command")]
    EmptyCommand { position: Position },
    #[error("{position}: `{keyword}` without matching `{opener}`")]
    UnmatchedKeyword {
        position: Position,
        keyword: String,
        opener: String,
    },
    #[error("{position}: invalid assignment target `{name}`")]
    InvalidAssignment { position: Position, name: String },
}
