//! `sort [-r] [-n] [-u] [file...]`: sorts lines lexically (`-n` for numeric,
//! `-r` to reverse, `-u` to drop adjacent-after-sort duplicates).

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let mut args = &argv[1..];
    let mut reverse = false;
    let mut numeric = false;
    let mut unique = false;
    loop {
        match args.first().map(String::as_str) {
            Some("-r") => {
                reverse = true;
                args = &args[1..];
            }
            Some("-n") => {
                numeric = true;
                args = &args[1..];
            }
            Some("-u") => {
                unique = true;
                args = &args[1..];
            }
            _ => break,
        }
    }

    let text: String = if args.is_empty() {
        String::from_utf8_lossy(stdin).into_owned()
    } else {
        let mut combined = String::new();
        for f in args {
            match state.env.fs.read_file(&state.env.cwd, f) {
                Ok(bytes) => combined.push_str(&String::from_utf8_lossy(&bytes)),
                Err(e) => return CommandOutput::stderr_msg(format!("bash: sort: {f}: {e}\n"), 1),
            }
        }
        combined
    };

    let mut lines: Vec<&str> = text.lines().collect();
    if numeric {
        lines.sort_by(|a, b| shsh_arith::coerce(Some(a)).cmp(&shsh_arith::coerce(Some(b))));
    } else {
        lines.sort_unstable();
    }
    if reverse {
        lines.reverse();
    }
    if unique {
        lines.dedup();
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    CommandOutput {
        stdout: out.into_bytes(),
        ..CommandOutput::success()
    }
}
