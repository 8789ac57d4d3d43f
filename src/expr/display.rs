
//! Infix rendering of expression trees.
//!
//! The output re-parses to an equivalent tree: operands are
//! parenthesized according to the same precedence table the grammar
//! uses, and `pow` is rendered in its function-call form since the
//! language has no infix power operator.

use super::Expr;
use super::ops::BinaryOp;

use std::fmt::{self, Display, Formatter};

// Unary signs and function calls are factors in the grammar, so they
// bind tighter than any infix operator.
const FACTOR_PRECEDENCE: u8 = 3;

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write_expr(self, 0, f)
  }
}

/// Writes `expr`, parenthesizing it if it binds looser than
/// `min_precedence`.
fn write_expr(expr: &Expr, min_precedence: u8, f: &mut Formatter<'_>) -> fmt::Result {
  match expr {
    Expr::Atom(atom) => write!(f, "{atom}"),
    Expr::Unary(op, operand) if op.is_function() => {
      write!(f, "{op}(")?;
      write_expr(operand, 0, f)?;
      write!(f, ")")
    }
    Expr::Unary(op, operand) => {
      write!(f, "{op}")?;
      write_expr(operand, FACTOR_PRECEDENCE, f)
    }
    Expr::Binary(BinaryOp::Pow, left, right) => {
      write!(f, "pow(")?;
      write_expr(left, 0, f)?;
      write!(f, ", ")?;
      write_expr(right, 0, f)?;
      write!(f, ")")
    }
    Expr::Binary(op, left, right) => {
      let precedence = op.precedence();
      if precedence < min_precedence {
        write!(f, "(")?;
        write_expr(expr, 0, f)?;
        write!(f, ")")
      } else {
        // Left-associative: the right operand needs strictly tighter
        // binding to round-trip, e.g. `a - (b + c)`.
        write_expr(left, precedence, f)?;
        write!(f, " {op} ")?;
        write_expr(right, precedence + 1, f)
      }
    }
  }
}
