//! `source file [arg...]` / `. file [arg...]`: reads a file from the VFS,
//! parses it, and runs it in the *current* shell state — no subshell, no
//! function-call frame, matching POSIX `.`.

use shsh_semantics::{exec, BuiltinRegistry, CommandOutput, ControlSignal, State};

pub fn main(state: &mut State, registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let Some(path) = argv.get(1) else {
        return CommandOutput::stderr_msg(b"bash: source: filename argument required\n".to_vec(), 2);
    };
    let bytes = match state.env.fs.read_file(&state.env.cwd, path) {
        Ok(b) => b,
        Err(e) => return CommandOutput::stderr_msg(format!("bash: source: {path}: {e}\n"), 1),
    };
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let list = match shsh_syntax::parse(&text) {
        Ok(l) => l,
        Err(e) => return CommandOutput::stderr_msg(format!("bash: source: {path}: {e}\n"), 2),
    };

    let saved_positional = if argv.len() > 2 {
        Some(std::mem::replace(&mut state.env.positional, argv[2..].to_vec()))
    } else {
        None
    };
    let mut output = exec::exec_list(state, registry, &list, stdin, true);
    if let Some(saved) = saved_positional {
        state.env.positional = saved;
    }
    if let Some(ControlSignal::Return(n)) = output.signal {
        output.exit = n;
        output.signal = None;
    }
    output
}
