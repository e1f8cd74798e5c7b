#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("{name}: unbound variable")]
    Unset { name: String },
    #[error("{message}")]
    Custom { message: String },
    #[error(transparent)]
    Arith(#[from] shsh_arith::ArithError),
    #[error(transparent)]
    Pattern(#[from] shsh_fnmatch::PatternError),
}
