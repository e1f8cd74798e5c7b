//! `declare [-p] [name...]` (§2.2): reconstructs variables as re-parseable
//! `declare name=value` text. With operands, reports only those names; with
//! none, reports the whole table — the same text `set` (no args) produces,
//! but tagged `declare` rather than bare.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let args: Vec<&str> = argv[1..].iter().map(String::as_str).filter(|a| *a != "-p").collect();

    if args.is_empty() {
        let text = state.env.reconstruct_assignments(false);
        let mut stdout = text.lines().map(|l| format!("declare {l}\n")).collect::<String>();
        if stdout.is_empty() {
            stdout = String::new();
        }
        return CommandOutput { stdout: stdout.into_bytes(), ..CommandOutput::success() };
    }

    let mut stdout = String::new();
    let mut missing = false;
    for name in args {
        match state.env.vars.get(name) {
            Some(var) => {
                let line = match &var.value {
                    shsh_env::Value::Scalar(s) => format!("declare {name}={}\n", shsh_quote::quote(s)),
                    shsh_env::Value::Array(items) => {
                        let body = items.iter().map(|s| shsh_quote::quote(s)).collect::<Vec<_>>().join(" ");
                        format!("declare {name}=({body})\n")
                    }
                };
                stdout.push_str(&line);
            }
            None => missing = true,
        }
    }
    CommandOutput {
        stdout: stdout.into_bytes(),
        exit: if missing { 1 } else { 0 },
        ..CommandOutput::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shsh_env::{Env, Options};

    #[test]
    fn reports_a_single_scalar() {
        let mut state = State::new(Env::new(Options::new()));
        state.env.vars.set_scalar("FOO", "bar").ok();
        let registry = BuiltinRegistry::new();
        let out = main(&mut state, &registry, &["declare".into(), "FOO".into()], &[]);
        assert_eq!(out.exit, 0);
        assert_eq!(String::from_utf8_lossy(&out.stdout), "declare FOO=bar\n");
    }

    #[test]
    fn missing_name_reports_nonzero() {
        let mut state = State::new(Env::new(Options::new()));
        let registry = BuiltinRegistry::new();
        let out = main(&mut state, &registry, &["declare".into(), "NOPE".into()], &[]);
        assert_eq!(out.exit, 1);
    }
}
