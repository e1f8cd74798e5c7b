//! `test`/`[`: the POSIX conditional command, sharing its file/string/integer
//! test vocabulary with `[[ ]]` (`shsh-semantics::conditional`) but with
//! POSIX's own grammar — `=` is literal string equality here, never a glob
//! pattern, and `-a`/`-o` join terms instead of `&&`/`||`.

use shsh_semantics::State;
use shsh_semantics::{BuiltinRegistry, CommandOutput};

const UNARY_FILE_OPS: &[&str] = &[
    "-e", "-f", "-d", "-L", "-h", "-s", "-r", "-w", "-x", "-p", "-S", "-b", "-c", "-u", "-g", "-k",
];
const UNARY_STRING_OPS: &[&str] = &["-z", "-n"];
const BINARY_OPS: &[&str] = &[
    "=", "!=", "-eq", "-ne", "-lt", "-le", "-gt", "-ge", "-nt", "-ot", "-ef",
];

fn eval_unary(state: &State, op: &str, operand: &str) -> bool {
    match op {
        "-e" => state.env.fs.exists(&state.env.cwd, operand),
        "-f" => state.env.fs.is_file(&state.env.cwd, operand),
        "-d" => state.env.fs.is_dir(&state.env.cwd, operand),
        "-L" | "-h" => state.env.fs.is_symlink(&state.env.cwd, operand),
        "-s" => state
            .env
            .fs
            .stat(&state.env.cwd, operand)
            .map(|s| s.size > 0)
            .unwrap_or(false),
        "-r" | "-w" | "-x" => state.env.fs.exists(&state.env.cwd, operand),
        "-z" => operand.is_empty(),
        "-n" => !operand.is_empty(),
        _ => false,
    }
}

fn eval_binary(state: &State, op: &str, lhs: &str, rhs: &str) -> Result<bool, String> {
    match op {
        "=" => Ok(lhs == rhs),
        "!=" => Ok(lhs != rhs),
        "-eq" | "-ne" | "-lt" | "-le" | "-gt" | "-ge" => {
            let l = shsh_arith::coerce(Some(lhs));
            let r = shsh_arith::coerce(Some(rhs));
            Ok(match op {
                "-eq" => l == r,
                "-ne" => l != r,
                "-lt" => l < r,
                "-le" => l <= r,
                "-gt" => l > r,
                "-ge" => l >= r,
                _ => unreachable!(),
            })
        }
        "-nt" | "-ot" => {
            let lm = state.env.fs.stat(&state.env.cwd, lhs).map(|s| s.mtime);
            let rm = state.env.fs.stat(&state.env.cwd, rhs).map(|s| s.mtime);
            Ok(match (lm, rm, op) {
                (Ok(l), Ok(r), "-nt") => l > r,
                (Ok(l), Ok(r), "-ot") => l < r,
                (Ok(_), Err(_), "-nt") => true,
                (Err(_), Ok(_), "-ot") => true,
                _ => false,
            })
        }
        "-ef" => {
            let l = state.env.fs.resolve(&state.env.cwd, lhs);
            let r = state.env.fs.resolve(&state.env.cwd, rhs);
            Ok(matches!((l, r), (Ok(l), Ok(r)) if l == r))
        }
        _ => Err(format!("test: unsupported operator `{op}`")),
    }
}

/// Evaluates one test term (no `-a`/`-o`), following the POSIX argument-count
/// disambiguation rules for 0..=4 arguments.
fn eval_term(state: &State, args: &[String]) -> Result<bool, String> {
    match args {
        [] => Ok(false),
        [s] => Ok(!s.is_empty()),
        [op, operand] if op == "!" => eval_term(state, std::slice::from_ref(operand)).map(|b| !b),
        [op, operand]
            if UNARY_FILE_OPS.contains(&op.as_str()) || UNARY_STRING_OPS.contains(&op.as_str()) =>
        {
            Ok(eval_unary(state, op, operand))
        }
        [lhs, op, rhs] if BINARY_OPS.contains(&op.as_str()) => eval_binary(state, op, lhs, rhs),
        [bang, rest @ ..] if bang == "!" => eval_term(state, rest).map(|b| !b),
        _ => Err(format!("test: unexpected arguments: {}", args.join(" "))),
    }
}

/// Splits on top-level `-a`/`-o`, evaluating left-to-right (`-a` binds
/// tighter, matching POSIX's documented precedence).
fn eval_expr(state: &State, args: &[String]) -> Result<bool, String> {
    let or_terms: Vec<&[String]> = split_on(args, "-o");
    let mut or_result = false;
    for (i, term) in or_terms.iter().enumerate() {
        let and_terms = split_on(term, "-a");
        let mut and_result = true;
        for and_term in and_terms {
            and_result = and_result && eval_term(state, and_term)?;
        }
        or_result = if i == 0 { and_result } else { or_result || and_result };
    }
    Ok(or_result)
}

fn split_on<'a>(args: &'a [String], sep: &str) -> Vec<&'a [String]> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, a) in args.iter().enumerate() {
        if a == sep {
            out.push(&args[start..i]);
            start = i + 1;
        }
    }
    out.push(&args[start..]);
    out
}

fn run(state: &mut State, args: &[String]) -> CommandOutput {
    match eval_expr(state, args) {
        Ok(true) => CommandOutput::success(),
        Ok(false) => CommandOutput::with_exit(1),
        Err(e) => CommandOutput::stderr_msg(format!("bash: {e}\n"), 2),
    }
}

pub fn test(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    run(state, &argv[1..])
}

/// `[` requires a matching trailing `]` operand.
pub fn bracket(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let Some(last) = argv.last() else {
        return CommandOutput::stderr_msg(b"bash: [: missing `]'\n".to_vec(), 2);
    };
    if last != "]" {
        return CommandOutput::stderr_msg(b"bash: [: missing `]'\n".to_vec(), 2);
    }
    run(state, &argv[1..argv.len() - 1])
}
