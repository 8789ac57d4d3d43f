
//! Tree-walking evaluation of expression trees.

use super::Expr;
use super::atom::Atom;
use super::environment::Environment;
use super::ops::{BinaryOp, UnaryOp};
use super::var::Var;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum EvalError {
  #[error("Unbound variable '{0}'")]
  UnboundVariable(Var),
}

/// Reduces a tree to a number under the given environment.
///
/// Evaluation is a structural recursion with no shared state: the
/// same tree and environment always produce the same result.
/// Arithmetic domain problems (division by zero, `log` of a
/// non-positive value, fractional powers of a negative base) follow
/// IEEE semantics and produce infinities or NaN, never an error.
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<f64, EvalError> {
  match expr {
    Expr::Atom(Atom::Number(n)) => Ok(*n),
    Expr::Atom(Atom::Var(v)) => {
      env.value(v).ok_or_else(|| EvalError::UnboundVariable(v.clone()))
    }
    Expr::Atom(Atom::Seed(v)) => Ok(env.seed(v)),
    Expr::Unary(op, operand) => {
      let x = evaluate(operand, env)?;
      Ok(match op {
        UnaryOp::Plus => x,
        UnaryOp::Negate => -x,
        UnaryOp::Cos => x.cos(),
        UnaryOp::Sin => x.sin(),
        UnaryOp::Exp => x.exp(),
        UnaryOp::Log => x.ln(),
      })
    }
    Expr::Binary(op, left, right) => {
      let left = evaluate(left, env)?;
      let right = evaluate(right, env)?;
      Ok(match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
        BinaryOp::Pow => left.powf(right),
      })
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_abs_diff_eq;

  fn var(name: &str) -> Var {
    Var::new(name).unwrap()
  }

  fn env(pairs: &[(&str, f64)]) -> Environment {
    pairs.iter().map(|(name, value)| (var(name), *value)).collect()
  }

  #[test]
  fn test_evaluate_arithmetic() {
    let expr = Expr::add(
      Expr::number(2.0),
      Expr::mul(Expr::number(3.0), Expr::number(4.0)),
    );
    assert_eq!(evaluate(&expr, &Environment::new()), Ok(14.0));

    let expr = Expr::div(Expr::sub(Expr::number(9.0), Expr::number(1.0)), Expr::number(4.0));
    assert_eq!(evaluate(&expr, &Environment::new()), Ok(2.0));
  }

  #[test]
  fn test_evaluate_unary() {
    let env = env(&[("x", 2.0)]);
    let x = Expr::var(var("x"));
    assert_eq!(evaluate(&Expr::neg(x.clone()), &env), Ok(-2.0));
    assert_eq!(evaluate(&Expr::unary(UnaryOp::Plus, x.clone()), &env), Ok(2.0));
    assert_abs_diff_eq!(
      evaluate(&Expr::unary(UnaryOp::Cos, x.clone()), &env).unwrap(),
      2.0_f64.cos()
    );
    assert_abs_diff_eq!(
      evaluate(&Expr::unary(UnaryOp::Sin, x.clone()), &env).unwrap(),
      2.0_f64.sin()
    );
    assert_abs_diff_eq!(
      evaluate(&Expr::unary(UnaryOp::Exp, x.clone()), &env).unwrap(),
      2.0_f64.exp()
    );
    assert_abs_diff_eq!(
      evaluate(&Expr::unary(UnaryOp::Log, x), &env).unwrap(),
      2.0_f64.ln()
    );
  }

  #[test]
  fn test_evaluate_pow() {
    let expr = Expr::pow(Expr::number(5.0), Expr::number(2.0));
    assert_eq!(evaluate(&expr, &Environment::new()), Ok(25.0));

    let expr = Expr::pow(Expr::number(2.0), Expr::number(-1.0));
    assert_eq!(evaluate(&expr, &Environment::new()), Ok(0.5));
  }

  #[test]
  fn test_evaluate_variables_and_seeds() {
    let mut env = env(&[("x", 3.0)]);
    env.set_seed(var("x"), 1.0);
    let expr = Expr::mul(Expr::var(var("x")), Expr::seed(var("x")));
    assert_eq!(evaluate(&expr, &env), Ok(3.0));

    // Seeds that were never activated evaluate to zero.
    let expr = Expr::seed(var("y"));
    assert_eq!(evaluate(&expr, &env), Ok(0.0));
  }

  #[test]
  fn test_evaluate_unbound_variable() {
    let expr = Expr::var(var("x"));
    assert_eq!(
      evaluate(&expr, &Environment::new()),
      Err(EvalError::UnboundVariable(var("x"))),
    );
  }

  #[test]
  fn test_domain_problems_are_not_errors() {
    let empty = Environment::new();

    let expr = Expr::div(Expr::number(1.0), Expr::number(0.0));
    assert_eq!(evaluate(&expr, &empty), Ok(f64::INFINITY));

    let expr = Expr::unary(UnaryOp::Log, Expr::number(-1.0));
    assert!(evaluate(&expr, &empty).unwrap().is_nan());

    let expr = Expr::pow(Expr::number(-8.0), Expr::number(0.5));
    assert!(evaluate(&expr, &empty).unwrap().is_nan());
  }
}
