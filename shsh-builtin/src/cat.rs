//! `cat [file...]`: concatenates files (or stdin, for `-` or no operands) to
//! stdout. No option flags are supported — the sandbox has no binary/text
//! mode distinction to toggle.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let paths = &argv[1..];
    if paths.is_empty() {
        return CommandOutput {
            stdout: stdin.to_vec(),
            ..CommandOutput::success()
        };
    }
    let mut out = CommandOutput::success();
    for path in paths {
        if path == "-" {
            out.stdout.extend_from_slice(stdin);
            continue;
        }
        match state.env.fs.read_file(&state.env.cwd, path) {
            Ok(bytes) => out.stdout.extend(bytes),
            Err(e) => {
                out.stderr.extend(format!("cat: {path}: {e}\n").into_bytes());
                out.exit = 1;
            }
        }
    }
    out
}
