
//! Lexical analysis of expression source text.

use super::source::{SourceOffset, Span};
use crate::expr::var::Var;

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;
use thiserror::Error;

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub data: TokenData,
  pub span: Span,
}

/// One lexical unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenData {
  Number(f64),
  Plus,
  Minus,
  Star,
  Slash,
  LeftParen,
  RightParen,
  Comma,
  Function(FunctionName),
  Var(Var),
  EndOfInput,
}

/// The fixed function vocabulary. The lexer matches these names
/// case-insensitively; any other word is a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
  Cos,
  Sin,
  Exp,
  Pow,
  Log,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum LexError {
  #[error("Unrecognized character '{0}' at {1}")]
  UnrecognizedChar(char, SourceOffset),
}

static KEYWORDS: phf::Map<&'static str, FunctionName> = phf_map! {
  "cos" => FunctionName::Cos,
  "sin" => FunctionName::Sin,
  "exp" => FunctionName::Exp,
  "pow" => FunctionName::Pow,
  "log" => FunctionName::Log,
};

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+").unwrap());

/// Splits `source` into tokens, eagerly. Whitespace is skipped
/// silently. The result always ends with exactly one
/// [`TokenData::EndOfInput`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
  let mut tokens = Vec::new();
  let mut pos = 0;
  loop {
    let rest = &source[pos..];
    let Some(ch) = rest.chars().next() else { break };

    if ch.is_whitespace() {
      pos += ch.len_utf8();
      continue;
    }

    if let Some(m) = NUMBER_RE.find(rest) {
      // unwrap safety: The number regex only matches valid float syntax.
      let value: f64 = m.as_str().parse().unwrap();
      tokens.push(Token::new(TokenData::Number(value), span_at(pos, m.len())));
      pos += m.len();
      continue;
    }

    if let Some(m) = WORD_RE.find(rest) {
      let word = m.as_str();
      let data = match KEYWORDS.get(word.to_ascii_lowercase().as_str()) {
        Some(function) => TokenData::Function(*function),
        // unwrap safety: An alphabetic word is always a valid
        // variable name. The name keeps its original case.
        None => TokenData::Var(Var::new(word).unwrap()),
      };
      tokens.push(Token::new(data, span_at(pos, m.len())));
      pos += m.len();
      continue;
    }

    let data = match ch {
      '+' => TokenData::Plus,
      '-' => TokenData::Minus,
      '*' => TokenData::Star,
      '/' => TokenData::Slash,
      '(' => TokenData::LeftParen,
      ')' => TokenData::RightParen,
      ',' => TokenData::Comma,
      _ => return Err(LexError::UnrecognizedChar(ch, SourceOffset(pos))),
    };
    tokens.push(Token::new(data, span_at(pos, ch.len_utf8())));
    pos += ch.len_utf8();
  }
  tokens.push(Token::new(TokenData::EndOfInput, Span::new(pos, pos)));
  Ok(tokens)
}

fn span_at(start: usize, len: usize) -> Span {
  Span::new(start, start + len)
}

impl Token {
  pub fn new(data: TokenData, span: Span) -> Self {
    Self { data, span }
  }
}

impl Display for TokenData {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TokenData::Number(n) => write!(f, "{n}"),
      TokenData::Plus => write!(f, "+"),
      TokenData::Minus => write!(f, "-"),
      TokenData::Star => write!(f, "*"),
      TokenData::Slash => write!(f, "/"),
      TokenData::LeftParen => write!(f, "("),
      TokenData::RightParen => write!(f, ")"),
      TokenData::Comma => write!(f, ","),
      TokenData::Function(function) => write!(f, "{function}"),
      TokenData::Var(v) => write!(f, "{v}"),
      TokenData::EndOfInput => write!(f, "end of input"),
    }
  }
}

impl Display for FunctionName {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let name = match self {
      FunctionName::Cos => "cos",
      FunctionName::Sin => "sin",
      FunctionName::Exp => "exp",
      FunctionName::Pow => "pow",
      FunctionName::Log => "log",
    };
    write!(f, "{name}")
  }
}
