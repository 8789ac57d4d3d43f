
use super::lexer::{Token, TokenData};

/// A cursor over a lexed token sequence.
///
/// The trailing `EndOfInput` token is sticky: reading past the end
/// keeps producing it, so the parser can always look at "the next
/// token" without an out-of-bounds case.
#[derive(Debug, Clone)]
pub struct TokenStream {
  tokens: Vec<Token>,
  position: usize,
}

impl TokenStream {
  /// The token vector must end with `EndOfInput`, as produced by
  /// [`tokenize`](super::lexer::tokenize).
  pub fn new(tokens: Vec<Token>) -> Self {
    assert!(
      matches!(tokens.last(), Some(Token { data: TokenData::EndOfInput, .. })),
      "token stream must end with EndOfInput",
    );
    Self { tokens, position: 0 }
  }

  pub fn peek(&self) -> &Token {
    &self.tokens[self.position]
  }

  /// Returns the current token and advances past it, except at the
  /// `EndOfInput` tail, which is returned on every subsequent call.
  pub fn advance(&mut self) -> Token {
    let token = self.tokens[self.position].clone();
    if self.position + 1 < self.tokens.len() {
      self.position += 1;
    }
    token
  }

  pub fn is_at_end(&self) -> bool {
    matches!(self.peek().data, TokenData::EndOfInput)
  }
}
