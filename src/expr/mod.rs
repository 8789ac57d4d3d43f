
pub mod atom;
pub mod display;
pub mod environment;
pub mod eval;
pub mod ops;
pub mod var;
pub mod walker;

use atom::Atom;
use ops::{BinaryOp, UnaryOp};
use var::Var;

use serde::{Serialize, Deserialize};

use std::collections::BTreeSet;

/// An expression tree.
///
/// Trees are immutable once constructed and uniquely owned by
/// whichever parse call created them. Evaluation and differentiation
/// never share or mutate nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
  Atom(Atom),
  Unary(UnaryOp, Box<Expr>),
  Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
  pub fn number(value: f64) -> Expr {
    Expr::Atom(Atom::Number(value))
  }

  pub fn var(v: Var) -> Expr {
    Expr::Atom(Atom::Var(v))
  }

  pub fn seed(v: Var) -> Expr {
    Expr::Atom(Atom::Seed(v))
  }

  /// The zero literal, the derivative of every constant.
  pub fn zero() -> Expr {
    Expr::number(0.0)
  }

  pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::Unary(op, Box::new(operand))
  }

  pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary(op, Box::new(left), Box::new(right))
  }

  // Shorthands for the operators the differentiation rules build
  // derivative trees out of.

  pub fn neg(operand: Expr) -> Expr {
    Expr::unary(UnaryOp::Negate, operand)
  }

  pub fn add(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Add, left, right)
  }

  pub fn sub(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Sub, left, right)
  }

  pub fn mul(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Mul, left, right)
  }

  pub fn div(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Div, left, right)
  }

  pub fn pow(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOp::Pow, left, right)
  }

  /// The variables (not seeds) mentioned anywhere in the tree.
  pub fn free_variables(&self) -> BTreeSet<Var> {
    let mut vars = BTreeSet::new();
    walker::postorder_walk(self, |e| {
      if let Expr::Atom(Atom::Var(v)) = e {
        vars.insert(v.clone());
      }
    });
    vars
  }

  /// The variables whose seeds are mentioned anywhere in the tree.
  pub fn free_seeds(&self) -> BTreeSet<Var> {
    let mut vars = BTreeSet::new();
    walker::postorder_walk(self, |e| {
      if let Expr::Atom(Atom::Seed(v)) = e {
        vars.insert(v.clone());
      }
    });
    vars
  }
}

impl From<Atom> for Expr {
  fn from(a: Atom) -> Expr {
    Expr::Atom(a)
  }
}
