//! Word expansion (§4.4): brace expansion runs first and lives in
//! [`crate::brace`]; everything else — tilde, variable/arithmetic/command
//! substitution, word splitting, pathname expansion, quote removal — runs
//! here, in that fixed order, on each word brace expansion produced.

use shsh_env::{ShellOpt, Value};
use shsh_fnmatch::PatternError;
use shsh_syntax::ast::{
    BracedParam, ExpansionMode, Modifier, ParamName, TextUnit, TrimLength, TrimSide, Word, WordUnit,
};

use crate::arith_adapter::StateVars;
use crate::error::ExpansionError;
use crate::state::{BuiltinRegistry, State};

/// A contribution to a field under construction. `Text` participates in
/// word splitting when unquoted; `HardField` is a complete field on its
/// own (the `"$@"`/`${arr[@]}` exception: always its own field regardless
/// of quoting).
#[derive(Clone, Debug)]
enum Segment {
    Text(String, bool),
    HardField(String),
}

enum Current {
    Unset,
    Scalar(String),
    Array(Vec<String>),
}

/// Expands a full argv — brace expansion, then tilde/substitution/split/glob
/// on each resulting word — concatenating every word's fields in order.
/// Used for simple-command words and `for`/array-literal word lists.
pub fn expand_words(
    state: &mut State,
    registry: &BuiltinRegistry,
    words: &[Word],
) -> Result<Vec<String>, ExpansionError> {
    let mut out = Vec::new();
    for word in words {
        for braced in crate::brace::brace_expand_word(word) {
            out.extend(expand_one(state, registry, &braced, true, true)?);
        }
    }
    Ok(out)
}

/// A scalar assignment RHS, a redirection operand, or any other single-word
/// context: substitution runs, but neither brace expansion, word splitting,
/// nor pathname expansion apply (§4.4, §4.5).
pub fn expand_assignment_value(
    state: &mut State,
    registry: &BuiltinRegistry,
    word: &Word,
) -> Result<String, ExpansionError> {
    let segments = expand_units_to_segments(state, registry, &word.units)?;
    Ok(single_field_concat(segments))
}

/// An `arr=(...)` literal: each element word undergoes the full pipeline
/// (brace/split/glob), like ordinary command-word expansion.
pub fn expand_array_literal(
    state: &mut State,
    registry: &BuiltinRegistry,
    words: &[Word],
) -> Result<Vec<String>, ExpansionError> {
    expand_words(state, registry, words)
}

/// A `case` pattern or the right-hand side of `[[ x = pattern ]]`: runs the
/// same substitution stage as an assignment value, but characters that came
/// from a quoted part of the word are escaped so they match themselves
/// literally rather than as glob metacharacters.
pub fn expand_pattern(
    state: &mut State,
    registry: &BuiltinRegistry,
    word: &Word,
) -> Result<String, ExpansionError> {
    let segments = expand_units_to_segments(state, registry, &word.units)?;
    Ok(pattern_text(segments))
}

fn expand_one(
    state: &mut State,
    registry: &BuiltinRegistry,
    word: &Word,
    split: bool,
    glob: bool,
) -> Result<Vec<String>, ExpansionError> {
    let segments = expand_units_to_segments(state, registry, &word.units)?;
    let ifs = state
        .env
        .vars
        .get_scalar("IFS")
        .unwrap_or(" \t\n")
        .to_string();
    let fields = finalize_fields(segments, &ifs, split);
    if glob && !state.env.shell_opts.contains(ShellOpt::Noglob) {
        let mut out = Vec::new();
        for (field, quoted) in fields {
            if quoted {
                out.push(field);
            } else {
                out.extend(glob_expand_field(state, &field));
            }
        }
        Ok(out)
    } else {
        Ok(fields.into_iter().map(|(f, _)| f).collect())
    }
}

fn expand_units_to_segments(
    state: &mut State,
    registry: &BuiltinRegistry,
    units: &[WordUnit],
) -> Result<Vec<Segment>, ExpansionError> {
    let mut out = Vec::new();
    for unit in units {
        match unit {
            WordUnit::Unquoted(tu) => out.extend(expand_text_unit(state, registry, tu, false)?),
            WordUnit::SingleQuote(s) => out.push(Segment::Text(s.clone(), true)),
            WordUnit::DoubleQuote(text) => {
                for tu in &text.0 {
                    out.extend(expand_text_unit(state, registry, tu, true)?);
                }
            }
        }
    }
    Ok(out)
}

fn expand_text_unit(
    state: &mut State,
    registry: &BuiltinRegistry,
    unit: &TextUnit,
    quoted: bool,
) -> Result<Vec<Segment>, ExpansionError> {
    match unit {
        TextUnit::Literal(c) => Ok(vec![Segment::Text(c.to_string(), quoted)]),
        TextUnit::Tilde(name) => Ok(vec![Segment::Text(expand_tilde(state, name), quoted)]),
        TextUnit::RawParam(name) => expand_raw_param(state, name, quoted),
        TextUnit::BracedParam(bp) => {
            let current = resolve_current(state, registry, bp)?;
            apply_modifier(state, registry, bp, current, quoted)
        }
        TextUnit::CommandSubst(list) => {
            let captured = crate::exec::run_capturing(state, registry, list)
                .map_err(|e| ExpansionError::Custom { message: e })?;
            Ok(vec![Segment::Text(captured, quoted)])
        }
        TextUnit::Arithmetic(word) => {
            let text = expand_assignment_value(state, registry, word)?;
            let mut vars = StateVars(state);
            let value = shsh_arith::eval(&text, &mut vars)?;
            Ok(vec![Segment::Text(value.to_string(), quoted)])
        }
    }
}

fn expand_tilde(state: &State, name: &str) -> String {
    if name.is_empty() {
        state.env.vars.get_scalar("HOME").unwrap_or("").to_string()
    } else {
        format!("~{name}")
    }
}

fn flags_string(state: &State) -> String {
    let mut s = String::new();
    if state.env.shell_opts.contains(ShellOpt::Errexit) {
        s.push('e');
    }
    if state.env.shell_opts.contains(ShellOpt::Nounset) {
        s.push('u');
    }
    if state.env.shell_opts.contains(ShellOpt::Xtrace) {
        s.push('x');
    }
    if state.env.shell_opts.contains(ShellOpt::Noglob) {
        s.push('f');
    }
    s
}

fn raw_special_value(state: &State, c: char) -> Option<String> {
    match c {
        '#' => Some(state.env.positional.len().to_string()),
        '?' => Some(state.env.last_exit.to_string()),
        '!' => Some(state.env.last_bg_pid.map(|p| p.to_string()).unwrap_or_default()),
        '$' => Some(state.env.pid.to_string()),
        '-' => Some(flags_string(state)),
        _ => None,
    }
}

fn expand_raw_param(state: &State, name: &ParamName, quoted: bool) -> Result<Vec<Segment>, ExpansionError> {
    match name {
        ParamName::Special('@') => Ok(state
            .env
            .positional
            .iter()
            .cloned()
            .map(Segment::HardField)
            .collect()),
        ParamName::Special('*') => {
            let ifs0 = ifs_first_char(state);
            Ok(vec![Segment::Text(state.env.positional.join(&ifs0), quoted)])
        }
        ParamName::Special(c) => Ok(vec![Segment::Text(
            raw_special_value(state, *c).unwrap_or_default(),
            quoted,
        )]),
        ParamName::Positional(n) => {
            let value = if *n == 0 {
                Some("shsh".to_string())
            } else {
                state.env.positional.get((*n - 1) as usize).cloned()
            };
            check_unset(state, value, quoted, &n.to_string())
        }
        ParamName::Variable(name) => {
            let value = state.env.vars.get_scalar(name).map(|s| s.to_string());
            check_unset(state, value, quoted, name)
        }
    }
}

fn ifs_first_char(state: &State) -> String {
    state
        .env
        .vars
        .get_scalar("IFS")
        .and_then(|s| s.chars().next())
        .map(|c| c.to_string())
        .unwrap_or_default()
}

fn check_unset(
    state: &State,
    value: Option<String>,
    quoted: bool,
    name: &str,
) -> Result<Vec<Segment>, ExpansionError> {
    match value {
        Some(s) => Ok(vec![Segment::Text(s, quoted)]),
        None if state.env.shell_opts.contains(ShellOpt::Nounset) => {
            Err(ExpansionError::Unset { name: name.to_string() })
        }
        None => Ok(vec![Segment::Text(String::new(), quoted)]),
    }
}

fn resolve_current(
    state: &mut State,
    registry: &BuiltinRegistry,
    bp: &BracedParam,
) -> Result<Current, ExpansionError> {
    let is_array_mode = matches!(bp.mode, ExpansionMode::Multiple);
    match &bp.name {
        ParamName::Special('@') => Ok(Current::Array(state.env.positional.clone())),
        ParamName::Special('*') => {
            if is_array_mode {
                Ok(Current::Array(state.env.positional.clone()))
            } else {
                let ifs0 = ifs_first_char(state);
                Ok(Current::Scalar(state.env.positional.join(&ifs0)))
            }
        }
        ParamName::Special(c) => Ok(raw_special_value(state, *c).map(Current::Scalar).unwrap_or(Current::Unset)),
        ParamName::Positional(n) => {
            let value = if *n == 0 {
                Some("shsh".to_string())
            } else {
                state.env.positional.get((*n - 1) as usize).cloned()
            };
            Ok(value.map(Current::Scalar).unwrap_or(Current::Unset))
        }
        ParamName::Variable(name) => {
            let index_text = match &bp.index {
                None => None,
                Some(w) => Some(expand_assignment_value(state, registry, w)?),
            };
            match state.env.vars.get(name).cloned() {
                None => {
                    if is_array_mode {
                        Ok(Current::Array(Vec::new()))
                    } else {
                        Ok(Current::Unset)
                    }
                }
                Some(var) => match var.value {
                    Value::Scalar(s) => {
                        if is_array_mode {
                            Ok(Current::Array(vec![s]))
                        } else {
                            Ok(Current::Scalar(s))
                        }
                    }
                    Value::Array(items) => {
                        if is_array_mode {
                            return Ok(Current::Array(items));
                        }
                        match index_text.as_deref() {
                            None => Ok(items.first().cloned().map(Current::Scalar).unwrap_or(Current::Unset)),
                            Some("*") => Ok(Current::Array(items)),
                            Some(idx_src) => {
                                let mut vars = StateVars(state);
                                let i = shsh_arith::eval(idx_src, &mut vars)?;
                                let idx = usize::try_from(i).ok();
                                Ok(idx
                                    .and_then(|i| items.get(i).cloned())
                                    .map(Current::Scalar)
                                    .unwrap_or(Current::Unset))
                            }
                        }
                    }
                },
            }
        }
    }
}

fn is_absent(current: &Current, colon: bool) -> bool {
    match current {
        Current::Unset => true,
        Current::Scalar(s) => colon && s.is_empty(),
        Current::Array(items) => items.is_empty(),
    }
}

fn current_to_segments(current: Current, quoted: bool) -> Vec<Segment> {
    match current {
        Current::Unset => vec![Segment::Text(String::new(), quoted)],
        Current::Scalar(s) => vec![Segment::Text(s, quoted)],
        Current::Array(items) => items.into_iter().map(Segment::HardField).collect(),
    }
}

fn assign_name(state: &mut State, name: &ParamName, value: String) -> Result<(), ExpansionError> {
    match name {
        ParamName::Variable(n) => state
            .env
            .vars
            .set_scalar(n, value)
            .map_err(|message| ExpansionError::Custom { message }),
        _ => Err(ExpansionError::Custom {
            message: "cannot assign to this parameter".to_string(),
        }),
    }
}

fn param_display_name(name: &ParamName) -> String {
    match name {
        ParamName::Variable(n) => n.clone(),
        ParamName::Positional(n) => n.to_string(),
        ParamName::Special(c) => c.to_string(),
    }
}

fn transform_current(
    current: Current,
    quoted: bool,
    mut f: impl FnMut(&str) -> Result<String, ExpansionError>,
) -> Result<Vec<Segment>, ExpansionError> {
    match current {
        Current::Unset => Ok(vec![Segment::Text(f("")?, quoted)]),
        Current::Scalar(s) => Ok(vec![Segment::Text(f(&s)?, quoted)]),
        Current::Array(items) => {
            let mut out = Vec::new();
            for item in items {
                out.push(Segment::HardField(f(&item)?));
            }
            Ok(out)
        }
    }
}

fn apply_modifier(
    state: &mut State,
    registry: &BuiltinRegistry,
    bp: &BracedParam,
    current: Current,
    quoted: bool,
) -> Result<Vec<Segment>, ExpansionError> {
    match &bp.modifier {
        Modifier::None => Ok(current_to_segments(current, quoted)),
        Modifier::Length => {
            let n = match &current {
                Current::Unset => 0,
                Current::Scalar(s) => s.chars().count(),
                Current::Array(items) => items.len(),
            };
            Ok(vec![Segment::Text(n.to_string(), quoted)])
        }
        Modifier::UseDefault { colon, word } => {
            if is_absent(&current, *colon) {
                let val = expand_assignment_value(state, registry, word)?;
                Ok(vec![Segment::Text(val, quoted)])
            } else {
                Ok(current_to_segments(current, quoted))
            }
        }
        Modifier::AssignDefault { colon, word } => {
            if is_absent(&current, *colon) {
                let val = expand_assignment_value(state, registry, word)?;
                assign_name(state, &bp.name, val.clone())?;
                Ok(vec![Segment::Text(val, quoted)])
            } else {
                Ok(current_to_segments(current, quoted))
            }
        }
        Modifier::UseAlternative { colon, word } => {
            if is_absent(&current, *colon) {
                Ok(vec![Segment::Text(String::new(), quoted)])
            } else {
                let val = expand_assignment_value(state, registry, word)?;
                Ok(vec![Segment::Text(val, quoted)])
            }
        }
        Modifier::Error { colon, word } => {
            if is_absent(&current, *colon) {
                let msg = expand_assignment_value(state, registry, word)?;
                let msg = if msg.is_empty() {
                    "parameter null or not set".to_string()
                } else {
                    msg
                };
                Err(ExpansionError::Custom {
                    message: format!("{}: {}", param_display_name(&bp.name), msg),
                })
            } else {
                Ok(current_to_segments(current, quoted))
            }
        }
        Modifier::Trim(trim) => {
            let pattern = expand_pattern(state, registry, &trim.pattern)?;
            let side = trim.side.clone();
            let length = trim.length.clone();
            transform_current(current, quoted, move |s| {
                trim_apply(&pattern, &side, &length, s).map_err(ExpansionError::from)
            })
        }
        Modifier::Replace { all, pattern, replacement } => {
            let pattern = expand_pattern(state, registry, pattern)?;
            let replacement = expand_assignment_value(state, registry, replacement)?;
            let all = *all;
            transform_current(current, quoted, move |s| {
                replace_apply(&pattern, &replacement, all, s).map_err(ExpansionError::from)
            })
        }
        Modifier::Substring { offset, length } => {
            let off_src = expand_assignment_value(state, registry, offset)?;
            let off = {
                let mut vars = StateVars(state);
                shsh_arith::eval(&off_src, &mut vars)?
            };
            let len = match length {
                None => None,
                Some(w) => {
                    let len_src = expand_assignment_value(state, registry, w)?;
                    let mut vars = StateVars(state);
                    Some(shsh_arith::eval(&len_src, &mut vars)?)
                }
            };
            transform_current(current, quoted, move |s| Ok(substring_apply(s, off, len)))
        }
        Modifier::UpperFirst => transform_current(current, quoted, |s| Ok(case_first(s, true))),
        Modifier::UpperAll => transform_current(current, quoted, |s| Ok(s.to_uppercase())),
        Modifier::LowerFirst => transform_current(current, quoted, |s| Ok(case_first(s, false))),
        Modifier::LowerAll => transform_current(current, quoted, |s| Ok(s.to_lowercase())),
    }
}

fn case_first(s: &str, upper: bool) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => {
            let head: String = if upper {
                c.to_uppercase().collect()
            } else {
                c.to_lowercase().collect()
            };
            head + chars.as_str()
        }
    }
}

fn trim_apply(pattern: &str, side: &TrimSide, length: &TrimLength, s: &str) -> Result<String, PatternError> {
    let longest = matches!(length, TrimLength::Longest);
    match side {
        TrimSide::Prefix => match shsh_fnmatch::match_prefix_len(pattern, s, longest)? {
            Some(len) => Ok(s[len..].to_string()),
            None => Ok(s.to_string()),
        },
        TrimSide::Suffix => match shsh_fnmatch::match_suffix_start(pattern, s, longest)? {
            Some(start) => Ok(s[..start].to_string()),
            None => Ok(s.to_string()),
        },
    }
}

fn replace_apply(pattern: &str, repl: &str, all: bool, s: &str) -> Result<String, PatternError> {
    let mut result = String::new();
    let mut rest = s;
    loop {
        match shsh_fnmatch::find_first(pattern, rest)? {
            None => {
                result.push_str(rest);
                break;
            }
            Some((start, end)) => {
                result.push_str(&rest[..start]);
                result.push_str(repl);
                if end == start {
                    match rest[end..].chars().next() {
                        Some(c) => {
                            result.push(c);
                            rest = &rest[end + c.len_utf8()..];
                        }
                        None => break,
                    }
                } else {
                    rest = &rest[end..];
                }
                if !all {
                    result.push_str(rest);
                    break;
                }
            }
        }
    }
    Ok(result)
}

fn substring_apply(s: &str, offset: i64, length: Option<i64>) -> String {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len() as i64;
    let start = if offset < 0 { (n + offset).max(0) } else { offset.min(n) };
    let end = match length {
        None => n,
        Some(len) if len < 0 => (n + len).max(start),
        Some(len) => (start + len).min(n),
    };
    if start >= end {
        return String::new();
    }
    chars[start as usize..end as usize].iter().collect()
}

fn single_field_concat(segments: Vec<Segment>) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Text(s, _) => out.push_str(&s),
            Segment::HardField(s) => out.push_str(&s),
        }
    }
    out
}

fn pattern_text(segments: Vec<Segment>) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Text(s, true) => {
                for c in s.chars() {
                    if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                        out.push('\\');
                    }
                    out.push(c);
                }
            }
            Segment::Text(s, false) => out.push_str(&s),
            Segment::HardField(s) => out.push_str(&s),
        }
    }
    out
}

fn is_ifs(c: char, ifs: &str) -> bool {
    ifs.contains(c)
}

fn flush_field(fields: &mut Vec<(String, bool)>, current: &mut String, has_content: &mut bool, quoted_any: &mut bool) {
    if *has_content {
        fields.push((std::mem::take(current), *quoted_any));
    } else {
        current.clear();
    }
    *has_content = false;
    *quoted_any = false;
}

/// Joins segments into fields, splitting unquoted text on `ifs` characters
/// when `split` is true. The returned bool marks whether any contributing
/// segment was quoted (such fields are never pathname-expanded).
fn finalize_fields(segments: Vec<Segment>, ifs: &str, split: bool) -> Vec<(String, bool)> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut has_content = false;
    let mut quoted_any = false;

    for seg in segments {
        match seg {
            Segment::Text(s, true) => {
                current.push_str(&s);
                has_content = true;
                quoted_any = true;
            }
            Segment::Text(s, false) => {
                if !split {
                    if !s.is_empty() {
                        has_content = true;
                    }
                    current.push_str(&s);
                    continue;
                }
                let chars: Vec<char> = s.chars().collect();
                let mut i = 0;
                while i < chars.len() {
                    if is_ifs(chars[i], ifs) {
                        let whitespace = chars[i].is_whitespace();
                        flush_field(&mut fields, &mut current, &mut has_content, &mut quoted_any);
                        i += 1;
                        if whitespace {
                            while i < chars.len() && is_ifs(chars[i], ifs) && chars[i].is_whitespace() {
                                i += 1;
                            }
                        }
                    } else {
                        current.push(chars[i]);
                        has_content = true;
                        i += 1;
                    }
                }
            }
            Segment::HardField(s) => {
                flush_field(&mut fields, &mut current, &mut has_content, &mut quoted_any);
                fields.push((s, true));
            }
        }
    }
    flush_field(&mut fields, &mut current, &mut has_content, &mut quoted_any);
    fields
}

fn has_glob_chars(s: &str) -> bool {
    s.chars().any(|c| matches!(c, '*' | '?' | '['))
}

fn join_path(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Joins a path onto the growing *display* prefix of a relative glob match
/// (empty at the root, unlike `join_path`'s absolute `dir`), so a relative
/// pattern's matches come back relative rather than rooted at `cwd`.
fn join_display(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Expands `pattern` as a pathname-expansion glob against the virtual
/// filesystem, returning the matched paths sorted for determinism, or the
/// pattern unchanged if it matches nothing (nullglob is not enabled — §4.4).
/// Matches keep the pattern's own rootedness: an absolute pattern expands to
/// absolute paths, a relative pattern (the common case, e.g. `*.txt`)
/// expands to paths relative to `cwd`, matching POSIX pathname expansion.
fn glob_expand_field(state: &State, pattern: &str) -> Vec<String> {
    if !has_glob_chars(pattern) {
        return vec![pattern.to_string()];
    }
    let absolute = pattern.starts_with('/');
    let components: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if components.is_empty() {
        return vec![pattern.to_string()];
    }
    // (absolute dir used for VFS lookups, display path reported to the caller)
    let mut candidates: Vec<(String, String)> =
        vec![(if absolute { "/".to_string() } else { state.env.cwd.clone() }, String::new())];
    for (i, comp) in components.iter().enumerate() {
        let is_last = i == components.len() - 1;
        let mut next = Vec::new();
        for (dir, display) in &candidates {
            if has_glob_chars(comp) {
                if let Ok(entries) = state.env.fs.read_dir("/", dir) {
                    for name in entries {
                        if name.starts_with('.') && !comp.starts_with('.') {
                            continue;
                        }
                        if shsh_fnmatch::matches(comp, &name).unwrap_or(false) {
                            let candidate = join_path(dir, &name);
                            if is_last || state.env.fs.is_dir("/", &candidate) {
                                next.push((candidate, join_display(display, &name)));
                            }
                        }
                    }
                }
            } else {
                let candidate = join_path(dir, comp);
                if is_last {
                    if state.env.fs.exists("/", &candidate) {
                        next.push((candidate, join_display(display, comp)));
                    }
                } else if state.env.fs.is_dir("/", &candidate) {
                    next.push((candidate, join_display(display, comp)));
                }
            }
        }
        candidates = next;
        if candidates.is_empty() {
            break;
        }
    }
    if candidates.is_empty() {
        vec![pattern.to_string()]
    } else {
        let mut result: Vec<String> = candidates
            .into_iter()
            .map(|(abs, display)| if absolute { abs } else { display })
            .collect();
        result.sort();
        result
    }
}

/// Expands a heredoc body's text run to a single string: used for
/// unquoted-delimiter heredocs, where variable/command/arithmetic
/// substitution applies but there is no field splitting or globbing.
pub(crate) fn expand_heredoc_text(
    state: &mut State,
    registry: &BuiltinRegistry,
    text: &shsh_syntax::ast::Text,
) -> Result<String, ExpansionError> {
    let mut segments = Vec::new();
    for tu in &text.0 {
        segments.extend(expand_text_unit(state, registry, tu, true)?);
    }
    Ok(single_field_concat(segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shsh_env::{Env, Options};
    use shsh_syntax::ast::Command;

    fn state_with(options: Options) -> State {
        State::new(Env::new(options))
    }

    fn word_from_script(src: &str, index: usize) -> Word {
        let list = shsh_syntax::parse(src).unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Simple(cmd) => cmd.words[index].clone(),
            _ => panic!("expected simple command"),
        }
    }

    #[test]
    fn literal_word_expands_unchanged() {
        let mut state = state_with(Options::new());
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo hello\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["hello"]);
    }

    #[test]
    fn variable_substitution() {
        let mut state = state_with(Options::new());
        state.env.vars.set_scalar("NAME", "world").unwrap();
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo $NAME\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["world"]);
    }

    #[test]
    fn use_default_when_unset() {
        let mut state = state_with(Options::new());
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo ${MISSING:-fallback}\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["fallback"]);
    }

    #[test]
    fn nounset_rejects_unset_variable() {
        let mut state = state_with(Options::new().with_opt(shsh_env::ShellOpt::Nounset));
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo $MISSING\n", 1);
        let err = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap_err();
        assert!(matches!(err, ExpansionError::Unset { .. }));
    }

    #[test]
    fn word_splitting_on_default_ifs() {
        let mut state = state_with(Options::new());
        state.env.vars.set_scalar("X", "a  b\tc").unwrap();
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo $X\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn double_quotes_suppress_splitting() {
        let mut state = state_with(Options::new());
        state.env.vars.set_scalar("X", "a b c").unwrap();
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo \"$X\"\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["a b c"]);
    }

    #[test]
    fn arithmetic_expansion() {
        let mut state = state_with(Options::new());
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo $((1 + 2 * 3))\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["7"]);
    }

    #[test]
    fn length_modifier() {
        let mut state = state_with(Options::new());
        state.env.vars.set_scalar("X", "hello").unwrap();
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo ${#X}\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["5"]);
    }

    #[test]
    fn suffix_trim_modifier() {
        let mut state = state_with(Options::new());
        state.env.vars.set_scalar("X", "file.txt").unwrap();
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo ${X%.txt}\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["file"]);
    }

    #[test]
    fn replace_all_modifier() {
        let mut state = state_with(Options::new());
        state.env.vars.set_scalar("X", "aXbXc").unwrap();
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo ${X//X/-}\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["a-b-c"]);
    }

    #[test]
    fn assign_default_mutates_variable() {
        let mut state = state_with(Options::new());
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo ${X:=set}\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["set"]);
        assert_eq!(state.env.vars.get_scalar("X"), Some("set"));
    }

    #[test]
    fn array_at_expansion_hard_splits() {
        use shsh_env::Variable;
        let mut state = state_with(Options::new());
        state
            .env
            .vars
            .set("arr", Variable::array(vec!["a b".into(), "c".into()]))
            .unwrap();
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo \"${arr[@]}\"\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["a b", "c"]);
    }

    #[test]
    fn pathname_expansion_matches_files() {
        let options = Options::new()
            .with_file("/home/user/a.txt", "1")
            .with_file("/home/user/b.txt", "2");
        let mut state = state_with(options);
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo *.txt\n", 1);
        let mut fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        fields.sort();
        assert_eq!(fields, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn glob_without_match_stays_literal() {
        let mut state = state_with(Options::new());
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo *.nomatch\n", 1);
        let fields = expand_words(&mut state, &registry, std::slice::from_ref(&word)).unwrap();
        assert_eq!(fields, vec!["*.nomatch"]);
    }

    #[test]
    fn case_pattern_escapes_quoted_glob_chars() {
        let mut state = state_with(Options::new());
        let registry = BuiltinRegistry::new();
        let word = word_from_script("echo \"*\"\n", 1);
        let pattern = expand_pattern(&mut state, &registry, &word).unwrap();
        assert_eq!(pattern, "\\*");
    }
}
