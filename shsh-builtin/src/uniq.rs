//! `uniq [-c]`: collapses adjacent duplicate lines; `-c` prefixes each
//! output line with its run length, GNU-style (right-justified to width 7).

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let mut args = &argv[1..];
    let mut show_count = false;
    if args.first().map(String::as_str) == Some("-c") {
        show_count = true;
        args = &args[1..];
    }

    let text: String = if args.is_empty() {
        String::from_utf8_lossy(stdin).into_owned()
    } else {
        match state.env.fs.read_file(&state.env.cwd, &args[0]) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => return CommandOutput::stderr_msg(format!("bash: uniq: {}: {e}\n", args[0]), 1),
        }
    };

    let mut out = String::new();
    let mut prev: Option<&str> = None;
    let mut run = 0usize;
    let flush = |out: &mut String, line: &str, run: usize| {
        if show_count {
            out.push_str(&format!("{run:7} {line}\n"));
        } else {
            out.push_str(line);
            out.push('\n');
        }
    };
    for line in text.lines() {
        match prev {
            Some(p) if p == line => run += 1,
            Some(p) => {
                flush(&mut out, p, run);
                prev = Some(line);
                run = 1;
            }
            None => {
                prev = Some(line);
                run = 1;
            }
        }
    }
    if let Some(p) = prev {
        flush(&mut out, p, run);
    }
    CommandOutput {
        stdout: out.into_bytes(),
        ..CommandOutput::success()
    }
}
