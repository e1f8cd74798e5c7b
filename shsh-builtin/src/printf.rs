//! `printf format [arg...]`: a subset of POSIX `printf` covering `%s`, `%d`,
//! `%%`, and the backslash escapes `\n`/`\t`/`\\` in the format string. If
//! the format consumes fewer arguments than are given, it is reapplied from
//! the start until all arguments are used, as POSIX specifies.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

fn render_once(format: &str, args: &[String], consumed: &mut usize) -> String {
    let mut out = String::new();
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '%' => match chars.next() {
                Some('%') => out.push('%'),
                Some('s') => {
                    out.push_str(args.get(*consumed).map(String::as_str).unwrap_or(""));
                    *consumed += 1;
                }
                Some('d') => {
                    let value = args.get(*consumed).map(String::as_str).unwrap_or("0");
                    out.push_str(&shsh_arith::coerce(Some(value)).to_string());
                    *consumed += 1;
                }
                Some('b') => {
                    out.push_str(args.get(*consumed).map(String::as_str).unwrap_or(""));
                    *consumed += 1;
                }
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            },
            other => out.push(other),
        }
    }
    out
}

fn has_conversion(format: &str) -> bool {
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some(n) = chars.next() {
                if n == 's' || n == 'd' || n == 'b' {
                    return true;
                }
            }
        }
    }
    false
}

pub fn main(_state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let Some(format) = argv.get(1) else {
        return CommandOutput::stderr_msg(b"printf: usage: printf format [arguments]\n".to_vec(), 2);
    };
    let args = &argv[2..];
    let mut out = String::new();
    if args.is_empty() || !has_conversion(format) {
        let mut consumed = 0;
        out.push_str(&render_once(format, args, &mut consumed));
    } else {
        let mut consumed = 0;
        while consumed < args.len() {
            let before = consumed;
            out.push_str(&render_once(format, args, &mut consumed));
            if consumed == before {
                break;
            }
        }
    }
    CommandOutput {
        stdout: out.into_bytes(),
        ..CommandOutput::success()
    }
}
