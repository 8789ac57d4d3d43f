
use crate::expr::eval::EvalError;
use crate::interpreter::DifferentiationError;
use crate::parsing::lexer::LexError;
use crate::parsing::parser::{ParseError, SyntaxError};
use crate::repl::BindingError;

use thiserror::Error;

/// Any error the engine can produce, for callers that want a single
/// failure type.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  Parse(#[from] ParseError),
  #[error("{0}")]
  Eval(#[from] EvalError),
  #[error("{0}")]
  Differentiation(#[from] DifferentiationError),
  #[error("{0}")]
  Binding(#[from] BindingError),
}

impl From<LexError> for Error {
  fn from(err: LexError) -> Self {
    Self::Parse(ParseError::from(err))
  }
}

impl From<SyntaxError> for Error {
  fn from(err: SyntaxError) -> Self {
    Self::Parse(ParseError::from(err))
  }
}
