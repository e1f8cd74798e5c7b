//! `sed 's/pattern/replacement/[g]' [file...]`: the one substitution form
//! scripts actually reach for; anything else is a usage error rather than a
//! silent no-op.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

struct Substitution {
    pattern: regex::Regex,
    replacement: String,
    global: bool,
}

fn parse_script(script: &str) -> Result<Substitution, String> {
    let rest = script.strip_prefix('s').ok_or("sed: only `s///` scripts are supported")?;
    let mut chars = rest.chars();
    let delim = chars.next().ok_or("sed: empty script")?;
    let body: String = chars.collect();
    let parts: Vec<&str> = body.splitn(3, delim).collect();
    let [pattern, replacement, flags] = parts[..] else {
        return Err("sed: malformed s/// script".to_string());
    };
    let re = regex::Regex::new(pattern).map_err(|e| format!("sed: {e}"))?;
    Ok(Substitution {
        pattern: re,
        replacement: replacement.replace('&', "$0"),
        global: flags.contains('g'),
    })
}

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
    let args = &argv[1..];
    let Some(script) = args.first() else {
        return CommandOutput::stderr_msg(b"bash: sed: usage: sed script [file...]\n".to_vec(), 2);
    };
    let sub = match parse_script(script) {
        Ok(s) => s,
        Err(e) => return CommandOutput::stderr_msg(format!("bash: {e}\n"), 2),
    };

    let files = &args[1..];
    let text: String = if files.is_empty() {
        String::from_utf8_lossy(stdin).into_owned()
    } else {
        let mut combined = String::new();
        for f in files {
            match state.env.fs.read_file(&state.env.cwd, f) {
                Ok(bytes) => combined.push_str(&String::from_utf8_lossy(&bytes)),
                Err(e) => return CommandOutput::stderr_msg(format!("bash: sed: {f}: {e}\n"), 2),
            }
        }
        combined
    };

    let mut out = String::new();
    for line in text.lines() {
        let replaced = if sub.global {
            sub.pattern.replace_all(line, sub.replacement.as_str())
        } else {
            sub.pattern.replace(line, sub.replacement.as_str())
        };
        out.push_str(&replaced);
        out.push('\n');
    }
    CommandOutput {
        stdout: out.into_bytes(),
        ..CommandOutput::success()
    }
}
