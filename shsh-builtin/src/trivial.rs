//! `true`, `false`, and `:` — the three builtins that never look at their
//! arguments beyond letting redirections apply to them.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn r#true(_state: &mut State, _registry: &BuiltinRegistry, _argv: &[String], _stdin: &[u8]) -> CommandOutput {
    CommandOutput::success()
}

pub fn r#false(_state: &mut State, _registry: &BuiltinRegistry, _argv: &[String], _stdin: &[u8]) -> CommandOutput {
    CommandOutput::with_exit(1)
}

pub fn colon(_state: &mut State, _registry: &BuiltinRegistry, _argv: &[String], _stdin: &[u8]) -> CommandOutput {
    CommandOutput::success()
}
