//! `exit [n]`: terminates the whole script with exit status `n` (default:
//! the last command's exit status). Propagated as [`ControlSignal::Exit`]
//! rather than raised, so every list/pipeline level along the way gets a
//! chance to flush its accumulated stdout/stderr first.

use shsh_semantics::{BuiltinRegistry, CommandOutput, ControlSignal, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let code = match argv.get(1) {
        Some(n) => shsh_arith::coerce(Some(n)) as i32 & 0xff,
        None => state.env.last_exit,
    };
    CommandOutput {
        exit: code,
        signal: Some(ControlSignal::Exit(code)),
        ..CommandOutput::success()
    }
}
