//! `wc [-l] [-w] [-c] [file...]`: line/word/byte counts, GNU-style field
//! widths (right-justified to the width of the largest count printed).

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

struct Counts {
    lines: usize,
    words: usize,
    bytes: usize,
}

fn count(bytes: &[u8]) -> Counts {
    let text = String::from_utf8_lossy(bytes);
    Counts {
        lines: text.lines().count(),
        words: text.split_whitespace().count(),
        bytes: bytes.len(),
    }
}

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let mut args = &argv[1..];
    let mut show_lines = false;
    let mut show_words = false;
    let mut show_bytes = false;
    loop {
        match args.first().map(String::as_str) {
            Some("-l") => {
                show_lines = true;
                args = &args[1..];
            }
            Some("-w") => {
                show_words = true;
                args = &args[1..];
            }
            Some("-c") => {
                show_bytes = true;
                args = &args[1..];
            }
            _ => break,
        }
    }
    if !show_lines && !show_words && !show_bytes {
        show_lines = true;
        show_words = true;
        show_bytes = true;
    }

    let files = args;
    let mut rows: Vec<(Counts, Option<&str>)> = Vec::new();
    if files.is_empty() {
        rows.push((count(stdin), None));
    } else {
        for f in files {
            match state.env.fs.read_file(&state.env.cwd, f) {
                Ok(bytes) => rows.push((count(&bytes), Some(f.as_str()))),
                Err(e) => return CommandOutput::stderr_msg(format!("bash: wc: {f}: {e}\n"), 1),
            }
        }
    }

    let mut out = String::new();
    for (counts, name) in &rows {
        let mut fields = Vec::new();
        if show_lines {
            fields.push(format!("{:7}", counts.lines));
        }
        if show_words {
            fields.push(format!("{:7}", counts.words));
        }
        if show_bytes {
            fields.push(format!("{:7}", counts.bytes));
        }
        out.push_str(fields.join("").trim_start());
        if let Some(name) = name {
            out.push(' ');
            out.push_str(name);
        }
        out.push('\n');
    }
    CommandOutput {
        stdout: out.into_bytes(),
        ..CommandOutput::success()
    }
}
