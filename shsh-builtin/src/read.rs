//! `read name...`: reads one line from stdin, splits it on `$IFS`, and
//! assigns the fields to the named variables — the last variable absorbs
//! any remaining text, including embedded separators, as POSIX specifies.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

fn split_ifs<'a>(line: &'a str, ifs: &str, n: usize) -> Vec<&'a str> {
    if n == 0 {
        return Vec::new();
    }
    let is_sep = |c: char| ifs.contains(c);
    let mut fields = Vec::new();
    let mut rest = line.trim_start_matches(is_sep);
    while fields.len() + 1 < n {
        match rest.find(is_sep) {
            Some(idx) => {
                fields.push(&rest[..idx]);
                rest = rest[idx..].trim_start_matches(is_sep);
            }
            None => break,
        }
    }
    fields.push(rest.trim_end_matches(is_sep));
    fields
}

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let names = &argv[1..];
    if names.is_empty() {
        return CommandOutput::stderr_msg(b"bash: read: usage: read name [name...]\n".to_vec(), 2);
    }
    let text = String::from_utf8_lossy(stdin);
    let Some(line) = text.split('\n').next().filter(|_| !stdin.is_empty()) else {
        return CommandOutput::with_exit(1);
    };
    let ifs = state.env.vars.get_scalar("IFS").unwrap_or(" \t\n").to_string();
    let fields = split_ifs(line, &ifs, names.len());
    for (i, name) in names.iter().enumerate() {
        let value = fields.get(i).copied().unwrap_or("");
        if let Err(e) = state.env.vars.set_scalar(name, value) {
            return CommandOutput::stderr_msg(format!("bash: read: {e}\n"), 1);
        }
    }
    CommandOutput::success()
}
