
use super::var::Var;

use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// The leaves of an expression tree.
///
/// A `Seed` is the derivative of a variable with respect to the
/// current differentiation target: 1 for the target itself and 0 for
/// every other variable. Seeds are a distinct atom kind rather than a
/// naming convention, so a user variable can never collide with one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Atom {
  Number(f64),
  Var(Var),
  Seed(Var),
}

impl From<f64> for Atom {
  fn from(n: f64) -> Self {
    Self::Number(n)
  }
}

impl From<Var> for Atom {
  fn from(v: Var) -> Self {
    Self::Var(v)
  }
}

impl Display for Atom {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Atom::Number(n) => write!(f, "{n}"),
      Atom::Var(v) => write!(f, "{v}"),
      // Display-only notation; there is no source syntax for seeds.
      Atom::Seed(v) => write!(f, "d_{v}"),
    }
  }
}
