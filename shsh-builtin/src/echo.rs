//! `echo [-n] [-e] [arg...]`: joins arguments with a single space. `-n`
//! suppresses the trailing newline; `-e` interprets `\n`, `\t`, and `\\`
//! escapes in the arguments (off by default, matching POSIX `echo` rather
//! than bash's interactive default).

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

fn interpret_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some('r') => out.push('\r'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn main(_state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let mut args = &argv[1..];
    let mut newline = true;
    let mut escapes = false;
    loop {
        match args.first().map(String::as_str) {
            Some("-n") => {
                newline = false;
                args = &args[1..];
            }
            Some("-e") => {
                escapes = true;
                args = &args[1..];
            }
            Some("-E") => {
                escapes = false;
                args = &args[1..];
            }
            _ => break,
        }
    }
    let joined = args.join(" ");
    let mut text = if escapes { interpret_escapes(&joined) } else { joined };
    if newline {
        text.push('\n');
    }
    CommandOutput {
        stdout: text.into_bytes(),
        ..CommandOutput::success()
    }
}
