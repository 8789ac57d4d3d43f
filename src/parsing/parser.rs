
//! Recursive-descent parsing of expressions.
//!
//! The grammar is differentiation-aware: every production builds the
//! value tree and its derivative tree side by side, so a single pass
//! over the token stream yields both. Each differentiation rule (sum,
//! product, quotient, chain, generalized power) is applied at the
//! moment the corresponding construct is recognized, using the value
//! subtrees that same production just built. No span of the input is
//! ever lexed or parsed twice.

use super::lexer::{self, FunctionName, LexError, TokenData};
use super::source::Span;
use super::token_stream::TokenStream;
use crate::expr::Expr;
use crate::expr::ops::UnaryOp;

use thiserror::Error;

/// Both trees produced by one parse of one source string. The trees
/// are structurally independent: they share no nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
  pub value: Expr,
  pub derivative: Expr,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum SyntaxError {
  #[error("Unexpected token '{found}' at {span}")]
  UnexpectedToken { found: TokenData, span: Span },
  #[error("Expected '{expected}' but found '{found}' at {span}")]
  ExpectedToken { expected: TokenData, found: TokenData, span: Span },
}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
  #[error("{0}")]
  Lex(#[from] LexError),
  #[error("{0}")]
  Syntax(#[from] SyntaxError),
}

/// Parses `source` completely, producing the value tree and the
/// derivative tree together. Fails if any token is left over after
/// the top-level production.
pub fn parse(source: &str) -> Result<ParseResult, ParseError> {
  let tokens = lexer::tokenize(source)?;
  let mut parser = Parser::new(TokenStream::new(tokens));
  let pair = parser.expr()?;
  parser.expect_end()?;
  Ok(ParseResult { value: pair.value, derivative: pair.derivative })
}

/// Parses `source` for evaluation only. This is a thin projection of
/// [`parse`]; the grammar always derives both trees.
pub fn parse_value(source: &str) -> Result<Expr, ParseError> {
  Ok(parse(source)?.value)
}

/// A value subtree together with its derivative subtree. Every
/// grammar production returns one of these.
#[derive(Debug, Clone)]
struct ExprPair {
  value: Expr,
  derivative: Expr,
}

#[derive(Debug)]
struct Parser {
  tokens: TokenStream,
}

impl Parser {
  fn new(tokens: TokenStream) -> Self {
    Self { tokens }
  }

  /// `expr := term (('+' | '-') term)*`
  fn expr(&mut self) -> Result<ExprPair, SyntaxError> {
    let mut pair = self.term()?;
    loop {
      match self.tokens.peek().data {
        TokenData::Plus => {
          self.tokens.advance();
          let rhs = self.term()?;
          pair = ExprPair {
            value: Expr::add(pair.value, rhs.value),
            derivative: Expr::add(pair.derivative, rhs.derivative),
          };
        }
        TokenData::Minus => {
          self.tokens.advance();
          let rhs = self.term()?;
          pair = ExprPair {
            value: Expr::sub(pair.value, rhs.value),
            derivative: Expr::sub(pair.derivative, rhs.derivative),
          };
        }
        _ => return Ok(pair),
      }
    }
  }

  /// `term := factor (('*' | '/') factor)*`
  fn term(&mut self) -> Result<ExprPair, SyntaxError> {
    let mut pair = self.factor()?;
    loop {
      match self.tokens.peek().data {
        TokenData::Star => {
          self.tokens.advance();
          let rhs = self.factor()?;
          pair = product(pair, rhs);
        }
        TokenData::Slash => {
          self.tokens.advance();
          let rhs = self.factor()?;
          pair = quotient(pair, rhs);
        }
        _ => return Ok(pair),
      }
    }
  }

  /// `factor := ('+' | '-') factor | Number | Var | '(' expr ')'
  ///          | function '(' expr [',' expr] ')'`
  ///
  /// The signs are right-associative via the recursion into `factor`
  /// and bind tighter than any binary operator.
  fn factor(&mut self) -> Result<ExprPair, SyntaxError> {
    let token = self.tokens.advance();
    match token.data {
      TokenData::Plus => {
        let operand = self.factor()?;
        Ok(ExprPair {
          value: Expr::unary(UnaryOp::Plus, operand.value),
          derivative: Expr::unary(UnaryOp::Plus, operand.derivative),
        })
      }
      TokenData::Minus => {
        let operand = self.factor()?;
        Ok(ExprPair {
          value: Expr::neg(operand.value),
          derivative: Expr::neg(operand.derivative),
        })
      }
      TokenData::Number(value) => Ok(ExprPair {
        value: Expr::number(value),
        derivative: Expr::zero(),
      }),
      TokenData::Var(var) => Ok(ExprPair {
        value: Expr::var(var.clone()),
        derivative: Expr::seed(var),
      }),
      TokenData::LeftParen => {
        // Parentheses propagate both trees unchanged.
        let pair = self.expr()?;
        self.expect(TokenData::RightParen)?;
        Ok(pair)
      }
      TokenData::Function(function) => self.function_call(function),
      found => Err(SyntaxError::UnexpectedToken { found, span: token.span }),
    }
  }

  fn function_call(&mut self, function: FunctionName) -> Result<ExprPair, SyntaxError> {
    self.expect(TokenData::LeftParen)?;
    let pair = match function {
      FunctionName::Pow => {
        let base = self.expr()?;
        self.expect(TokenData::Comma)?;
        let exponent = self.expr()?;
        power(base, exponent)
      }
      FunctionName::Cos => {
        let ExprPair { value: x, derivative: dx } = self.expr()?;
        ExprPair {
          value: Expr::unary(UnaryOp::Cos, x.clone()),
          // d cos(x) = -sin(x) * dx
          derivative: Expr::mul(Expr::neg(Expr::unary(UnaryOp::Sin, x)), dx),
        }
      }
      FunctionName::Sin => {
        let ExprPair { value: x, derivative: dx } = self.expr()?;
        ExprPair {
          value: Expr::unary(UnaryOp::Sin, x.clone()),
          // d sin(x) = cos(x) * dx
          derivative: Expr::mul(Expr::unary(UnaryOp::Cos, x), dx),
        }
      }
      FunctionName::Exp => {
        let ExprPair { value: x, derivative: dx } = self.expr()?;
        // d exp(x) = exp(x) * dx
        let value = Expr::unary(UnaryOp::Exp, x);
        let derivative = Expr::mul(value.clone(), dx);
        ExprPair { value, derivative }
      }
      FunctionName::Log => {
        let ExprPair { value: x, derivative: dx } = self.expr()?;
        ExprPair {
          value: Expr::unary(UnaryOp::Log, x.clone()),
          // d log(x) = dx / x
          derivative: Expr::div(dx, x),
        }
      }
    };
    self.expect(TokenData::RightParen)?;
    Ok(pair)
  }

  fn expect(&mut self, expected: TokenData) -> Result<(), SyntaxError> {
    let token = self.tokens.advance();
    if token.data == expected {
      Ok(())
    } else {
      Err(SyntaxError::ExpectedToken { expected, found: token.data, span: token.span })
    }
  }

  /// Trailing tokens after the top-level production are an error.
  fn expect_end(&mut self) -> Result<(), SyntaxError> {
    let token = self.tokens.peek();
    if self.tokens.is_at_end() {
      Ok(())
    } else {
      Err(SyntaxError::UnexpectedToken { found: token.data.clone(), span: token.span })
    }
  }
}

/// Product rule: `(ab)' = a'b + ab'`.
fn product(lhs: ExprPair, rhs: ExprPair) -> ExprPair {
  let derivative = Expr::add(
    Expr::mul(lhs.derivative, rhs.value.clone()),
    Expr::mul(lhs.value.clone(), rhs.derivative),
  );
  ExprPair {
    value: Expr::mul(lhs.value, rhs.value),
    derivative,
  }
}

/// Quotient rule: `(a/b)' = (a'b - ab') / b²`.
fn quotient(lhs: ExprPair, rhs: ExprPair) -> ExprPair {
  let numerator = Expr::sub(
    Expr::mul(lhs.derivative, rhs.value.clone()),
    Expr::mul(lhs.value.clone(), rhs.derivative),
  );
  let denominator = Expr::mul(rhs.value.clone(), rhs.value.clone());
  ExprPair {
    value: Expr::div(lhs.value, rhs.value),
    derivative: Expr::div(numerator, denominator),
  }
}

/// Generalized power rule, valid for a variable base and exponent:
/// `d(x^y) = x^y * ((y/x)*dx + dy*log(x))`. The logarithm implicitly
/// requires `x > 0`; non-positive bases propagate NaN at evaluation
/// time rather than failing here.
fn power(base: ExprPair, exponent: ExprPair) -> ExprPair {
  let ExprPair { value: x, derivative: dx } = base;
  let ExprPair { value: y, derivative: dy } = exponent;
  let value = Expr::pow(x.clone(), y.clone());
  let derivative = Expr::mul(
    value.clone(),
    Expr::add(
      Expr::mul(Expr::div(y, x.clone()), dx),
      Expr::mul(dy, Expr::unary(UnaryOp::Log, x)),
    ),
  );
  ExprPair { value, derivative }
}
