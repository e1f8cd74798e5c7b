//! `env` / `printenv [name...]`: prints the exported environment. `env` with
//! no operands lists every exported `NAME=value` pair; `printenv` with names
//! prints only those values, one per line, exiting 1 if any is unset.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn env(state: &mut State, _registry: &BuiltinRegistry, _argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let mut lines: Vec<String> = state
        .env
        .flat_env()
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    lines.sort_unstable();
    let mut stdout = lines.join("\n").into_bytes();
    if !stdout.is_empty() {
        stdout.push(b'\n');
    }
    CommandOutput {
        stdout,
        ..CommandOutput::success()
    }
}

pub fn printenv(state: &mut State, registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let names = &argv[1..];
    if names.is_empty() {
        return env(state, registry, argv, stdin);
    }
    let mut out = String::new();
    let mut missing = false;
    for name in names {
        let exported = state.env.vars.get(name).map(|v| v.is_exported()).unwrap_or(false);
        match state.env.vars.get_scalar(name) {
            Some(value) if exported => {
                out.push_str(value);
                out.push('\n');
            }
            _ => missing = true,
        }
    }
    CommandOutput {
        stdout: out.into_bytes(),
        exit: if missing { 1 } else { 0 },
        ..CommandOutput::success()
    }
}
