#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArithError {
    #[error("syntax error in arithmetic expression: {0}")]
    Syntax(String),
    #[error("unexpected end of arithmetic expression")]
    UnexpectedEof,
    #[error("division by zero")]
    DivByZero,
    #[error("modulo by zero")]
    ModByZero,
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
}
