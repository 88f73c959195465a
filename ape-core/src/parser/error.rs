use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: String,
        found: String,
    },
    #[error("no prefix parse function for {token} found")]
    NoPrefixParse {
        token: String,
    },
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger {
        literal: String,
    },
    #[error("could not parse {literal:?} as float")]
    InvalidFloat {
        literal: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    /// Short label for the offending span and the longer explanation lines.
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { expected, .. } => (
                format!("Expected `{expected}`"),
                vec![self.error.to_string()]
            ),
            ParseErrorType::NoPrefixParse { token } => (
                format!("`{token}` cannot start an expression"),
                vec![self.error.to_string()]
            ),
            ParseErrorType::InvalidInteger { .. } => (
                "Invalid integer literal".to_string(),
                vec![self.error.to_string()]
            ),
            ParseErrorType::InvalidFloat { .. } => (
                "Invalid float literal".to_string(),
                vec![self.error.to_string()]
            ),
        }
    }
}
