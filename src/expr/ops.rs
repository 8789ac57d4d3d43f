
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// Unary operators: the two signs and the one-argument functions from
/// the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
  Plus,
  Negate,
  Cos,
  Sin,
  Exp,
  Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Pow,
}

impl UnaryOp {
  /// True if the operator is written as a function call, such as
  /// `cos(x)`, as opposed to a prefix sign.
  pub fn is_function(self) -> bool {
    !matches!(self, UnaryOp::Plus | UnaryOp::Negate)
  }
}

impl BinaryOp {
  /// Binding strength, matching the grammar: additive operators bind
  /// loosest. `Pow` has no infix spelling, so its precedence only
  /// matters as "tighter than everything".
  pub fn precedence(self) -> u8 {
    match self {
      BinaryOp::Add | BinaryOp::Sub => 1,
      BinaryOp::Mul | BinaryOp::Div => 2,
      BinaryOp::Pow => 3,
    }
  }
}

impl Display for UnaryOp {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let name = match self {
      UnaryOp::Plus => "+",
      UnaryOp::Negate => "-",
      UnaryOp::Cos => "cos",
      UnaryOp::Sin => "sin",
      UnaryOp::Exp => "exp",
      UnaryOp::Log => "log",
    };
    write!(f, "{name}")
  }
}

impl Display for BinaryOp {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let name = match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Pow => "pow",
    };
    write!(f, "{name}")
  }
}
