//! Arithmetic expansion and evaluation for `$((...))` and `((...))`: a Pratt
//! parser with the standard C precedence ladder extended with `**`
//! (right-associative), ternary `?:`, and comma-sequence, plus an
//! AST-walking evaluator.

pub mod ast;
mod eval;
pub mod error;
mod parser;
mod token;

pub use ast::{AssignOp, BinaryOp, Expr, UnaryOp};
pub use error::ArithError;
pub use eval::{coerce, eval, Variables};

/// Parses an arithmetic expression into an [`Expr`] without evaluating it,
/// for callers (tooling, tests) that want to inspect the AST directly.
pub fn parse(src: &str) -> Result<Expr, ArithError> {
    parser::parse(src)
}
