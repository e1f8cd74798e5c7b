//! `awk [-F sep] 'program' [file...]`: a deliberately small subset of AWK —
//! one `{ print ... }` action, no patterns, no user variables. The action's
//! argument list is comma-separated `$N` field references, string literals,
//! and `$0`; enough to cover field-rewriting pipelines (§8 S4).

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

fn split_fields<'a>(line: &'a str, sep: Option<&str>) -> Vec<&'a str> {
    match sep {
        Some(s) if !s.is_empty() => line.split(s).collect(),
        _ => line.split_whitespace().collect(),
    }
}

fn parse_action(program: &str) -> Result<Vec<String>, String> {
    let body = program.trim();
    let body = body
        .strip_prefix('{')
        .and_then(|b| b.strip_suffix('}'))
        .ok_or_else(|| "awk: only `{ print ... }` actions are supported".to_string())?
        .trim();
    let body = body
        .strip_prefix("print")
        .ok_or_else(|| "awk: only `print` actions are supported".to_string())?
        .trim();
    if body.is_empty() {
        return Ok(vec!["$0".to_string()]);
    }
    Ok(body.split(',').map(|s| s.trim().to_string()).collect())
}

fn render_term(term: &str, fields: &[&str], whole_line: &str) -> String {
    if let Some(rest) = term.strip_prefix('$') {
        if rest == "0" {
            return whole_line.to_string();
        }
        if let Ok(n) = rest.parse::<usize>() {
            return fields.get(n.wrapping_sub(1)).copied().unwrap_or("").to_string();
        }
    }
    if (term.starts_with('"') && term.ends_with('"') && term.len() >= 2)
        || (term.starts_with('\'') && term.ends_with('\'') && term.len() >= 2)
    {
        return term[1..term.len() - 1].to_string();
    }
    term.to_string()
}

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let mut args = &argv[1..];
    let mut fs_sep: Option<String> = None;
    if args.first().map(String::as_str) == Some("-F") {
        args = &args[1..];
        let Some(sep) = args.first() else {
            return CommandOutput::stderr_msg(b"bash: awk: -F: separator required\n".to_vec(), 2);
        };
        fs_sep = Some(sep.clone());
        args = &args[1..];
    }
    let Some(program) = args.first() else {
        return CommandOutput::stderr_msg(b"bash: awk: usage: awk [-F sep] program [file...]\n".to_vec(), 2);
    };
    let terms = match parse_action(program) {
        Ok(t) => t,
        Err(e) => return CommandOutput::stderr_msg(format!("bash: {e}\n"), 2),
    };

    let files = &args[1..];
    let text: std::borrow::Cow<str> = if files.is_empty() {
        String::from_utf8_lossy(stdin).into_owned().into()
    } else {
        let mut combined = String::new();
        for f in files {
            match state.env.fs.read_file(&state.env.cwd, f) {
                Ok(bytes) => combined.push_str(&String::from_utf8_lossy(&bytes)),
                Err(e) => return CommandOutput::stderr_msg(format!("bash: awk: {f}: {e}\n"), 2),
            }
        }
        combined.into()
    };

    let mut out = String::new();
    for line in text.lines() {
        let fields = split_fields(line, fs_sep.as_deref());
        let rendered: Vec<String> = terms.iter().map(|t| render_term(t, &fields, line)).collect();
        out.push_str(&rendered.join(" "));
        out.push('\n');
    }
    CommandOutput {
        stdout: out.into_bytes(),
        ..CommandOutput::success()
    }
}
