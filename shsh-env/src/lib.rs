//! Sandboxed shell execution state (environment, shell options, cwd,
//! positional parameters, trap table) and the in-memory virtual filesystem
//! it reads and writes. Everything here is plain owned data, cloned
//! wholesale to give subshells and command substitutions an isolated copy
//! per §5.

mod env;
pub mod error;
pub mod opts;
pub mod options;
pub mod path;
pub mod variable;
pub mod vfs;

pub use env::Env;
pub use error::FsError;
pub use opts::{ShellOpt, ShellOpts};
pub use options::{HttpCapability, Options, SeedFile};
pub use variable::{Attr, Value, VarTable, Variable};
pub use vfs::{ContentAdapter, Fs, FileBody, INode, InodeId, NodeKind, Stat};
