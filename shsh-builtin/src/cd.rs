//! `cd [dir]`: changes the shell's working directory. With no operand, goes
//! to `$HOME`; `-` goes to `$OLDPWD` and echoes the new directory, matching
//! bash.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let target = match argv.get(1).map(String::as_str) {
        None => state.env.vars.get_scalar("HOME").unwrap_or("/").to_string(),
        Some("-") => match state.env.vars.get_scalar("OLDPWD") {
            Some(old) => old.to_string(),
            None => return CommandOutput::stderr_msg(b"bash: cd: OLDPWD not set\n".to_vec(), 1),
        },
        Some(dir) => dir.to_string(),
    };

    if !state.env.fs.is_dir(&state.env.cwd, &target) {
        return CommandOutput::stderr_msg(format!("bash: cd: {target}: No such directory\n"), 1);
    }
    if let Err(e) = state.env.fs.resolve(&state.env.cwd, &target) {
        return CommandOutput::stderr_msg(format!("bash: cd: {target}: {e}\n"), 1);
    }
    let resolved = shsh_env::path::resolve_path(&state.env.cwd, &target);

    let old_cwd = state.env.cwd.clone();
    state.env.vars.set_scalar("OLDPWD", &old_cwd).ok();
    state.env.set_cwd(resolved.clone());

    if argv.get(1).map(String::as_str) == Some("-") {
        return CommandOutput {
            stdout: format!("{resolved}\n").into_bytes(),
            ..CommandOutput::success()
        };
    }
    CommandOutput::success()
}
