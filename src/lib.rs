
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod parsing;
pub mod repl;
