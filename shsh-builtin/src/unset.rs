//! `unset [-f] name...`: removes variables (default) or functions (`-f`).

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let mut args = &argv[1..];
    let mut functions = false;
    if args.first().map(String::as_str) == Some("-f") {
        functions = true;
        args = &args[1..];
    } else if args.first().map(String::as_str) == Some("-v") {
        args = &args[1..];
    }
    let mut out = CommandOutput::success();
    for name in args {
        if functions {
            state.functions.remove(name);
        } else if let Err(e) = state.env.vars.unset(name) {
            out.stderr.extend(format!("bash: unset: {e}\n").into_bytes());
            out.exit = 1;
        }
    }
    out
}
