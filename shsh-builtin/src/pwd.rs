//! `pwd`: prints the current logical working directory.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, _argv: &[String], _stdin: &[u8]) -> CommandOutput {
    CommandOutput {
        stdout: format!("{}\n", state.env.cwd).into_bytes(),
        ..CommandOutput::success()
    }
}
