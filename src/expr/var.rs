
use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// A variable in an expression, left intentionally un-evaluated until
/// an [`Environment`](super::environment::Environment) gives it a
/// value.
///
/// Variables are identified by strings. A variable's name must begin
/// with a letter, followed by zero or more letters, digits, or
/// underscores. This structure enforces these constraints.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Var(String);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Invalid variable name '{0}'")]
pub struct InvalidNameError(String);

static VALID_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap()
});

impl Var {
  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Var {
  type Error = InvalidNameError;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    if VALID_NAME_RE.is_match(&name) {
      Ok(Self(name))
    } else {
      Err(InvalidNameError(name))
    }
  }
}

impl From<Var> for String {
  fn from(v: Var) -> Self {
    v.0
  }
}

impl Display for Var {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", &self.0)
  }
}
