//! `continue [n]`: skips to the next iteration of the `n`th enclosing loop
//! (default 1).

use shsh_semantics::{BuiltinRegistry, CommandOutput, ControlSignal, State};

pub fn main(_state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let levels = argv.get(1).map(|n| shsh_arith::coerce(Some(n))).unwrap_or(1).max(1) as u32;
    CommandOutput {
        signal: Some(ControlSignal::Continue(levels)),
        ..CommandOutput::success()
    }
}
