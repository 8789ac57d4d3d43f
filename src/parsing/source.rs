
use std::fmt::{self, Display, Formatter};

/// Thin wrapper around `usize` representing a position in the source
/// string being lexed. Usually used for error reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceOffset(pub usize);

/// A span of source offsets. Spans are half-open intervals, with
/// `start` included and `end` excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
  pub start: SourceOffset,
  pub end: SourceOffset,
}

impl Span {
  pub fn new(start: impl Into<SourceOffset>, end: impl Into<SourceOffset>) -> Self {
    Self { start: start.into(), end: end.into() }
  }

  pub fn len(&self) -> usize {
    self.end.0 - self.start.0
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

impl From<usize> for SourceOffset {
  fn from(i: usize) -> Self {
    SourceOffset(i)
  }
}

impl Display for SourceOffset {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Display for Span {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.start, self.end)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_span_len() {
    assert_eq!(Span::new(2, 5).len(), 3);
    assert!(!Span::new(2, 5).is_empty());
    assert_eq!(Span::new(4, 4).len(), 0);
    assert!(Span::new(4, 4).is_empty());
  }

  #[test]
  fn test_span_display() {
    assert_eq!(Span::new(0, 3).to_string(), "0-3");
  }
}
