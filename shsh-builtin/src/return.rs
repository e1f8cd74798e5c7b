//! `return [n]`: returns from the innermost function call (or, outside any
//! function, behaves like `exit`/stops a sourced script) with status `n`.

use shsh_semantics::{BuiltinRegistry, CommandOutput, ControlSignal, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let code = match argv.get(1) {
        Some(n) => shsh_arith::coerce(Some(n)) as i32 & 0xff,
        None => state.env.last_exit,
    };
    CommandOutput {
        exit: code,
        signal: Some(ControlSignal::Return(code)),
        ..CommandOutput::success()
    }
}
