
//! The derivative driver: seeded evaluation of a parsed tree pair.

use crate::expr::Expr;
use crate::expr::environment::Environment;
use crate::expr::eval::{self, EvalError};
use crate::expr::var::Var;
use crate::parsing::parser::{self, ParseError, ParseResult};

use itertools::Itertools;
use thiserror::Error;

use std::collections::BTreeMap;

/// Owns the value tree and derivative tree for one parsed expression
/// and evaluates them against caller-supplied environments.
///
/// Differentiation is forward-mode: a partial derivative is obtained
/// by evaluating the derivative tree with exactly one variable's seed
/// set to 1. [`Interpreter::differentiate_all`] therefore costs one
/// full tree evaluation per variable. That is the intended complexity
/// of forward mode, not an accident to be optimized away.
#[derive(Debug, Clone)]
pub struct Interpreter {
  value_tree: Expr,
  derivative_tree: Expr,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum DifferentiationError {
  #[error("No variable '{0}' to differentiate with respect to")]
  MissingSeed(Var),
  #[error("{0}")]
  Eval(#[from] EvalError),
}

impl Interpreter {
  pub fn new(source: &str) -> Result<Self, ParseError> {
    Ok(Self::from(parser::parse(source)?))
  }

  pub fn value_tree(&self) -> &Expr {
    &self.value_tree
  }

  pub fn derivative_tree(&self) -> &Expr {
    &self.derivative_tree
  }

  /// Evaluates the value tree at the point described by `env`.
  pub fn interpret(&self, env: &Environment) -> Result<f64, EvalError> {
    eval::evaluate(&self.value_tree, env)
  }

  /// The partial derivative with respect to `var`, evaluated at the
  /// point described by `env`. Fails with
  /// [`DifferentiationError::MissingSeed`] if `var` is not bound in
  /// the environment. The caller's environment is never touched;
  /// seeding happens on a local copy.
  pub fn differentiate(&self, env: &Environment, var: &Var) -> Result<f64, DifferentiationError> {
    if !env.contains(var) {
      return Err(DifferentiationError::MissingSeed(var.clone()));
    }
    let mut seeded = env.clone();
    seeded.reset_seeds();
    seeded.set_seed(var.clone(), 1.0);
    Ok(eval::evaluate(&self.derivative_tree, &seeded)?)
  }

  /// Every partial derivative at once: one seeded evaluation of the
  /// same derivative tree per variable bound in `env`.
  pub fn differentiate_all(&self, env: &Environment) -> Result<BTreeMap<Var, f64>, DifferentiationError> {
    env.vars()
      .map(|var| self.differentiate(env, var).map(|partial| (var.clone(), partial)))
      .try_collect()
  }
}

impl From<ParseResult> for Interpreter {
  fn from(result: ParseResult) -> Self {
    Self {
      value_tree: result.value,
      derivative_tree: result.derivative,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_abs_diff_eq;

  use std::f64::consts::E;

  fn var(name: &str) -> Var {
    Var::new(name).unwrap()
  }

  fn env(pairs: &[(&str, f64)]) -> Environment {
    pairs.iter().map(|(name, value)| (var(name), *value)).collect()
  }

  #[test]
  fn test_interpret_literal_expression() {
    let interpreter = Interpreter::new("2+3*4").unwrap();
    assert_eq!(interpreter.interpret(&Environment::new()), Ok(14.0));
  }

  #[test]
  fn test_interpret_with_variables() {
    let interpreter = Interpreter::new("x*x + y").unwrap();
    assert_eq!(interpreter.interpret(&env(&[("x", 3.0), ("y", 4.0)])), Ok(13.0));
  }

  #[test]
  fn test_interpret_unbound_variable() {
    let interpreter = Interpreter::new("x").unwrap();
    assert_eq!(
      interpreter.interpret(&Environment::new()),
      Err(EvalError::UnboundVariable(var("x"))),
    );
  }

  #[test]
  fn test_differentiate_product() {
    let interpreter = Interpreter::new("x*x").unwrap();
    let env = env(&[("x", 3.0)]);
    assert_eq!(interpreter.differentiate(&env, &var("x")), Ok(6.0));
  }

  #[test]
  fn test_differentiate_sin() {
    let interpreter = Interpreter::new("sin(x)").unwrap();
    let env = env(&[("x", 0.0)]);
    assert_eq!(interpreter.differentiate(&env, &var("x")), Ok(1.0));
  }

  #[test]
  fn test_differentiate_pow_constant_exponent() {
    let interpreter = Interpreter::new("pow(x,2)").unwrap();
    let env = env(&[("x", 5.0)]);
    assert_abs_diff_eq!(
      interpreter.differentiate(&env, &var("x")).unwrap(),
      10.0,
      epsilon = 1e-9
    );
  }

  #[test]
  fn test_differentiate_pow_variable_exponent() {
    // d(x^x) = x^x * (ln(x) + 1); at x = e that is e^e * 2.
    let interpreter = Interpreter::new("pow(x,x)").unwrap();
    let env = env(&[("x", E)]);
    let expected = E.powf(E) * (E.ln() + 1.0);
    assert_abs_diff_eq!(
      interpreter.differentiate(&env, &var("x")).unwrap(),
      expected,
      epsilon = 1e-9
    );
  }

  #[test]
  fn test_differentiate_quotient_and_chain() {
    // d/dx log(x)/x = (1 - ln(x)) / x²; at x = 2.
    let interpreter = Interpreter::new("log(x)/x").unwrap();
    let env = env(&[("x", 2.0)]);
    let expected = (1.0 - 2.0_f64.ln()) / 4.0;
    assert_abs_diff_eq!(
      interpreter.differentiate(&env, &var("x")).unwrap(),
      expected,
      epsilon = 1e-12
    );
  }

  #[test]
  fn test_differentiate_partial_derivatives() {
    let interpreter = Interpreter::new("x*y + sin(x)").unwrap();
    let env = env(&[("x", 0.0), ("y", 3.0)]);
    assert_abs_diff_eq!(interpreter.differentiate(&env, &var("x")).unwrap(), 4.0);
    assert_abs_diff_eq!(interpreter.differentiate(&env, &var("y")).unwrap(), 0.0);
  }

  #[test]
  fn test_differentiate_missing_seed() {
    let interpreter = Interpreter::new("x").unwrap();
    let env = env(&[("x", 1.0)]);
    assert_eq!(
      interpreter.differentiate(&env, &var("y")),
      Err(DifferentiationError::MissingSeed(var("y"))),
    );
  }

  #[test]
  fn test_differentiate_does_not_mutate_environment() {
    let interpreter = Interpreter::new("x*x").unwrap();
    let env = env(&[("x", 3.0)]);
    let before = env.clone();
    interpreter.differentiate(&env, &var("x")).unwrap();
    assert_eq!(env, before);
  }

  #[test]
  fn test_differentiate_all_matches_single_seeds() {
    let interpreter = Interpreter::new("x*y + cos(x)").unwrap();
    let env = env(&[("x", 1.5), ("y", -2.0)]);
    let gradient = interpreter.differentiate_all(&env).unwrap();
    assert_eq!(gradient.len(), env.len());
    for v in env.vars() {
      assert_eq!(gradient[v], interpreter.differentiate(&env, v).unwrap());
    }
  }

  #[test]
  fn test_differentiate_all_empty_environment() {
    let interpreter = Interpreter::new("1+2").unwrap();
    let gradient = interpreter.differentiate_all(&Environment::new()).unwrap();
    assert!(gradient.is_empty());
  }

  #[test]
  fn test_parse_twice_evaluates_identically() {
    let env = env(&[("x", 0.7), ("y", 1.9)]);
    let first = Interpreter::new("pow(x, y) * exp(x) - y").unwrap();
    let second = Interpreter::new("pow(x, y) * exp(x) - y").unwrap();
    assert_eq!(first.interpret(&env), second.interpret(&env));
    assert_eq!(
      first.differentiate_all(&env).unwrap(),
      second.differentiate_all(&env).unwrap(),
    );
  }

  #[test]
  fn test_derivative_seeds_come_from_value_tree_variables() {
    let interpreter = Interpreter::new("x*y + exp(x/z)").unwrap();
    let seeds = interpreter.derivative_tree().free_seeds();
    let variables = interpreter.value_tree().free_variables();
    assert!(seeds.is_subset(&variables));
  }

  #[test]
  fn test_display_reparse_round_trip() {
    let env = env(&[("x", 1.25), ("y", 0.5)]);
    for source in [
      "2+3*4",
      "(x+y)*(x-y)",
      "-x*2 + +y",
      "pow(x, y) / cos(x)",
      "sin(x)*exp(x) - log(y)",
      "1 - 2 - 3 - x",
    ] {
      let original = Interpreter::new(source).unwrap();
      let rendered = original.value_tree().to_string();
      let reparsed = Interpreter::new(&rendered).unwrap();
      assert_eq!(
        original.interpret(&env).unwrap(),
        reparsed.interpret(&env).unwrap(),
        "round-tripping {source:?} through {rendered:?}",
      );
    }
  }

  #[test]
  fn test_power_rule_nan_for_negative_base() {
    // The generalized power rule takes log of the base; negative
    // bases follow IEEE NaN propagation rather than raising.
    let interpreter = Interpreter::new("pow(x, x)").unwrap();
    let env = env(&[("x", -2.0)]);
    assert!(interpreter.differentiate(&env, &var("x")).unwrap().is_nan());
  }
}
