
//! The interactive outer layer: parsing of the textual
//! variable-binding format and the prompt loop.
//!
//! The core never reads the console. Everything here takes its input
//! and output as explicit arguments, so the loop is as testable
//! against in-memory buffers as it is usable on stdin/stdout.

use crate::error::Error;
use crate::expr::environment::Environment;
use crate::expr::var::Var;
use crate::interpreter::Interpreter;

use thiserror::Error as ThisError;

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

/// The numeric results for one expression at one point: its value and
/// its full gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
  pub value: f64,
  pub gradient: BTreeMap<Var, f64>,
}

#[derive(Debug, Clone, ThisError, PartialEq)]
#[non_exhaustive]
pub enum BindingError {
  #[error("Malformed binding '{0}', expected 'name:value'")]
  MalformedBinding(String),
  #[error("Invalid variable name '{0}'")]
  InvalidName(String),
  #[error("Invalid numeric value '{0}'")]
  InvalidValue(String),
}

/// Parses the textual binding format: comma-separated `name:value`
/// pairs, whitespace-insensitive, each value a decimal literal.
/// A blank string is an empty environment.
pub fn parse_bindings(text: &str) -> Result<Environment, BindingError> {
  let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
  if text.is_empty() {
    return Ok(Environment::new());
  }
  let mut env = Environment::new();
  for binding in text.split(',') {
    let Some((name, value)) = binding.split_once(':') else {
      return Err(BindingError::MalformedBinding(binding.to_owned()));
    };
    let var = Var::new(name).ok_or_else(|| BindingError::InvalidName(name.to_owned()))?;
    let value: f64 = value.parse().map_err(|_| BindingError::InvalidValue(value.to_owned()))?;
    env.insert(var, value);
  }
  Ok(env)
}

/// One full round: parse the expression, evaluate it, and take every
/// partial derivative at the given point.
pub fn evaluate_request(source: &str, bindings: &str) -> Result<Report, Error> {
  let interpreter = Interpreter::new(source)?;
  let env = parse_bindings(bindings)?;
  let value = interpreter.interpret(&env)?;
  let gradient = interpreter.differentiate_all(&env)?;
  Ok(Report { value, gradient })
}

/// Runs the prompt loop until end of input or a blank expression
/// line. Errors in a round are reported and the loop continues.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
  let mut lines = input.lines();
  loop {
    write!(output, "expr> ")?;
    output.flush()?;
    let Some(source) = lines.next().transpose()? else { break };
    if source.trim().is_empty() {
      break;
    }

    write!(output, "vars> ")?;
    output.flush()?;
    let bindings = lines.next().transpose()?.unwrap_or_default();

    match evaluate_request(&source, &bindings) {
      Ok(report) => {
        writeln!(output, "value = {}", report.value)?;
        for (var, partial) in &report.gradient {
          writeln!(output, "d_{var} = {partial}")?;
        }
      }
      Err(err) => {
        writeln!(output, "error: {err}")?;
      }
    }
  }
  Ok(())
}
