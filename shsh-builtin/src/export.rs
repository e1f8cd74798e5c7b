//! `export [name[=value]...]`: marks variables for inclusion in the
//! exported-environment view (`Env::flat_env`/`reconstruct_assignments`).
//! With no operands, lists exported variables as `export name=value` lines.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let args = &argv[1..];
    if args.is_empty() {
        let mut out = String::new();
        for (name, var) in state.env.vars.exported_iter() {
            let value = var.value.as_scalar().unwrap_or("");
            out.push_str(&format!("export {name}={}\n", shsh_quote::quote(value)));
        }
        return CommandOutput {
            stdout: out.into_bytes(),
            ..CommandOutput::success()
        };
    }
    for arg in args {
        match arg.split_once('=') {
            Some((name, value)) => {
                if let Err(e) = state.env.vars.set_scalar(name, value) {
                    return CommandOutput::stderr_msg(format!("bash: export: {e}\n"), 1);
                }
                state.env.vars.mark_exported(name);
            }
            None => state.env.vars.mark_exported(arg),
        }
    }
    CommandOutput::success()
}
