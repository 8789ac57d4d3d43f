
//! Lexing and parsing of expression source text.

pub mod lexer;
pub mod parser;
pub mod source;
pub mod token_stream;
