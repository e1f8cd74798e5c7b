//! `shift [n]`: drops the first `n` positional parameters (default 1).

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let n = argv.get(1).map(|n| shsh_arith::coerce(Some(n))).unwrap_or(1).max(0) as usize;
    if n > state.env.positional.len() {
        return CommandOutput::with_exit(1);
    }
    state.env.positional.drain(0..n);
    CommandOutput::success()
}
