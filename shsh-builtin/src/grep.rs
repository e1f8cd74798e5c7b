//! `grep [-v] [-i] [-n] pattern [file...]`: prints lines matching a basic
//! regular expression. With no files, reads stdin. Exits 1 if no line
//! matched (POSIX `grep` convention), 2 on a bad pattern or unreadable file.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let mut args = &argv[1..];
    let mut invert = false;
    let mut ignore_case = false;
    let mut line_numbers = false;
    loop {
        match args.first().map(String::as_str) {
            Some("-v") => {
                invert = true;
                args = &args[1..];
            }
            Some("-i") => {
                ignore_case = true;
                args = &args[1..];
            }
            Some("-n") => {
                line_numbers = true;
                args = &args[1..];
            }
            _ => break,
        }
    }
    let Some(pattern) = args.first() else {
        return CommandOutput::stderr_msg(b"bash: grep: usage: grep [-vin] pattern [file...]\n".to_vec(), 2);
    };
    let pattern_text = if ignore_case {
        format!("(?i){pattern}")
    } else {
        pattern.clone()
    };
    let re = match regex::Regex::new(&pattern_text) {
        Ok(re) => re,
        Err(e) => return CommandOutput::stderr_msg(format!("bash: grep: {e}\n"), 2),
    };

    let files = &args[1..];
    let mut sources: Vec<(Option<&str>, Vec<u8>)> = Vec::new();
    if files.is_empty() {
        sources.push((None, stdin.to_vec()));
    } else {
        for f in files {
            match state.env.fs.read_file(&state.env.cwd, f) {
                Ok(bytes) => sources.push((Some(f.as_str()), bytes)),
                Err(e) => {
                    return CommandOutput::stderr_msg(format!("bash: grep: {f}: {e}\n"), 2);
                }
            }
        }
    }

    let multiple = files.len() > 1;
    let mut out = String::new();
    let mut matched = false;
    for (name, bytes) in &sources {
        let text = String::from_utf8_lossy(bytes);
        for (i, line) in text.lines().enumerate() {
            if re.is_match(line) != invert {
                matched = true;
                if let Some(name) = name {
                    if multiple {
                        out.push_str(name);
                        out.push(':');
                    }
                }
                if line_numbers {
                    out.push_str(&(i + 1).to_string());
                    out.push(':');
                }
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    CommandOutput {
        stdout: out.into_bytes(),
        exit: if matched { 0 } else { 1 },
        ..CommandOutput::success()
    }
}
