//! Word expansion and the AST-walking executor for the shsh sandboxed
//! shell: everything that turns a parsed `shsh-syntax` AST plus a
//! `shsh-env::Env` into `CommandOutput`s. Builtins are *not* implemented
//! here — `shsh-builtin` depends on this crate and registers its
//! implementations into a [`BuiltinRegistry`] the caller constructs and
//! passes into [`exec::exec_list`].

mod arith_adapter;
mod brace;
mod conditional;
pub mod error;
pub mod exec;
pub mod expand;
pub mod state;

pub use error::ExpansionError;
pub use state::{Builtin, BuiltinRegistry, CommandOutput, ControlSignal, State};
