//! The AST-walking executor (§4.5): statements, pipelines, redirection,
//! control flow, and command dispatch (function, then builtin, then
//! command-not-found). Nothing here spawns an OS process — "running a
//! command" always means either a user-defined function body or a
//! `Builtin::execute` call against the sandboxed `State`.

use std::rc::Rc;

use shsh_env::ShellOpt;
use shsh_syntax::ast::{
    AndOr, AndOrList, Command, CompoundCommand, FullCompoundCommand, List, Redir, RedirBody, RedirOp, Text,
    TextUnit,
};

use crate::arith_adapter::StateVars;
use crate::conditional;
use crate::expand;
use crate::state::{BuiltinRegistry, CommandOutput, ControlSignal, State};

/// Runs a list to completion and returns its captured stdout as a string,
/// for command substitution (`$(...)`/`` `...` ``): trailing newlines are
/// stripped, matching every POSIX shell's documented behavior.
pub fn run_capturing(state: &mut State, registry: &BuiltinRegistry, list: &List) -> Result<String, String> {
    let output = exec_list(state, registry, list, &[], true);
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    while text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Runs a whole script (or compound-command body) in sequence, honoring
/// `&&`/`||` short-circuiting within each item and `errexit` across items.
/// `apply_errexit` is `false` inside a condition context (`if`/`while`
/// tests), where a non-zero exit is the expected, tolerated outcome.
pub fn exec_list(state: &mut State, registry: &BuiltinRegistry, list: &List, stdin: &[u8], apply_errexit: bool) -> CommandOutput {
    let mut acc = CommandOutput::success();
    for item in &list.0 {
        let out = exec_and_or_list(state, registry, &item.and_or, stdin);
        acc.stdout.extend(out.stdout);
        acc.stderr.extend(out.stderr);
        acc.exit = out.exit;
        state.env.set_last_exit(out.exit);
        if out.signal.is_some() {
            acc.signal = out.signal;
            return acc;
        }
        let has_and_or = !item.and_or.rest.is_empty();
        if apply_errexit && !has_and_or && out.exit != 0 && state.env.shell_opts.contains(ShellOpt::Errexit) {
            acc.signal = Some(ControlSignal::Exit(out.exit));
            return acc;
        }
    }
    acc
}

fn exec_and_or_list(state: &mut State, registry: &BuiltinRegistry, ao: &AndOrList, stdin: &[u8]) -> CommandOutput {
    let mut acc = exec_pipeline(state, registry, &ao.first, stdin);
    for (op, pipeline) in &ao.rest {
        if acc.signal.is_some() {
            return acc;
        }
        let should_run = match op {
            AndOr::And => acc.exit == 0,
            AndOr::Or => acc.exit != 0,
        };
        if !should_run {
            continue;
        }
        let out = exec_pipeline(state, registry, pipeline, stdin);
        acc.stdout.extend(out.stdout);
        acc.stderr.extend(out.stderr);
        acc.exit = out.exit;
        acc.signal = out.signal;
    }
    acc
}

fn exec_pipeline(state: &mut State, registry: &BuiltinRegistry, p: &shsh_syntax::ast::Pipeline, stdin: &[u8]) -> CommandOutput {
    let mut output = if p.commands.len() == 1 {
        exec_command(state, registry, &p.commands[0], stdin)
    } else {
        let mut stage_stdin = stdin.to_vec();
        let mut worst_exit = 0;
        let last = p.commands.len() - 1;
        let mut final_out = CommandOutput::success();
        for (i, cmd) in p.commands.iter().enumerate() {
            if i < last {
                // Non-final stages run in an isolated clone: a pipeline's
                // earlier stages never mutate the parent shell's state.
                let mut stage_state = state.clone();
                let out = exec_command(&mut stage_state, registry, cmd, &stage_stdin);
                if out.exit != 0 {
                    worst_exit = out.exit;
                }
                if out.signal.is_some() {
                    final_out = out;
                    break;
                }
                stage_stdin = out.stdout;
                final_out.stderr.extend(out.stderr);
            } else {
                let out = exec_command(state, registry, cmd, &stage_stdin);
                final_out.stdout = out.stdout;
                final_out.stderr.extend(out.stderr);
                final_out.exit = out.exit;
                final_out.signal = out.signal;
                if out.exit != 0 {
                    worst_exit = out.exit;
                }
            }
        }
        if state.env.shell_opts.contains(ShellOpt::Pipefail) && worst_exit != 0 {
            final_out.exit = worst_exit;
        }
        final_out
    };
    if p.negation && output.signal.is_none() {
        output.exit = if output.exit == 0 { 1 } else { 0 };
    }
    output
}

fn exec_command(state: &mut State, registry: &BuiltinRegistry, cmd: &Command, stdin: &[u8]) -> CommandOutput {
    match cmd {
        Command::Simple(sc) => exec_simple(state, registry, sc, stdin),
        Command::Compound(fc) => exec_full_compound(state, registry, fc, stdin),
        Command::Function(def) => {
            state
                .functions
                .insert(def.name.clone(), Rc::new((*def.body).clone()));
            CommandOutput::success()
        }
    }
}

struct RedirPlan {
    stdin_override: Option<Vec<u8>>,
    stdout_target: Option<(String, bool)>,
    stderr_target: Option<(String, bool)>,
    merge_stderr_to_stdout: bool,
}

fn render_text_literal(text: &Text) -> String {
    text.0
        .iter()
        .filter_map(|u| match u {
            TextUnit::Literal(c) => Some(*c),
            _ => None,
        })
        .collect()
}

fn build_redir_plan(state: &mut State, registry: &BuiltinRegistry, redirs: &[Redir]) -> Result<RedirPlan, CommandOutput> {
    let mut plan = RedirPlan {
        stdin_override: None,
        stdout_target: None,
        stderr_target: None,
        merge_stderr_to_stdout: false,
    };
    for r in redirs {
        let fd = r.fd.unwrap_or(match r.op {
            RedirOp::FileIn | RedirOp::HereDoc | RedirOp::HereDocTabs | RedirOp::HereString | RedirOp::DupIn => 0,
            _ => 1,
        });
        match (&r.op, &r.body) {
            (RedirOp::FileIn, RedirBody::Normal { operand }) => {
                let path = expand::expand_assignment_value(state, registry, operand)
                    .map_err(|e| CommandOutput::stderr_msg(format!("bash: {e}\n"), 1))?;
                let bytes = state
                    .env
                    .fs
                    .read_file(&state.env.cwd, &path)
                    .map_err(|e| CommandOutput::stderr_msg(format!("bash: {path}: {e}\n"), 1))?;
                plan.stdin_override = Some(bytes);
            }
            (RedirOp::FileOut | RedirOp::FileClobber, RedirBody::Normal { operand }) => {
                let path = expand::expand_assignment_value(state, registry, operand)
                    .map_err(|e| CommandOutput::stderr_msg(format!("bash: {e}\n"), 1))?;
                if fd == 2 {
                    plan.stderr_target = Some((path, false));
                } else {
                    plan.stdout_target = Some((path, false));
                }
            }
            (RedirOp::FileAppend, RedirBody::Normal { operand }) => {
                let path = expand::expand_assignment_value(state, registry, operand)
                    .map_err(|e| CommandOutput::stderr_msg(format!("bash: {e}\n"), 1))?;
                if fd == 2 {
                    plan.stderr_target = Some((path, true));
                } else {
                    plan.stdout_target = Some((path, true));
                }
            }
            (RedirOp::FileInOut, RedirBody::Normal { operand }) => {
                let path = expand::expand_assignment_value(state, registry, operand)
                    .map_err(|e| CommandOutput::stderr_msg(format!("bash: {e}\n"), 1))?;
                plan.stdin_override = state.env.fs.read_file(&state.env.cwd, &path).ok();
            }
            (RedirOp::DupOut, RedirBody::Normal { operand }) => {
                let target = expand::expand_assignment_value(state, registry, operand)
                    .map_err(|e| CommandOutput::stderr_msg(format!("bash: {e}\n"), 1))?;
                if fd == 2 && target.trim() == "1" {
                    plan.merge_stderr_to_stdout = true;
                }
            }
            (RedirOp::DupIn, RedirBody::Normal { .. }) => {}
            (RedirOp::HereString, RedirBody::Normal { operand }) => {
                let mut text = expand::expand_assignment_value(state, registry, operand)
                    .map_err(|e| CommandOutput::stderr_msg(format!("bash: {e}\n"), 1))?;
                text.push('\n');
                plan.stdin_override = Some(text.into_bytes());
            }
            (RedirOp::HereDoc | RedirOp::HereDocTabs, RedirBody::HereDoc(hd)) => {
                let content = if hd.quoted {
                    render_text_literal(&hd.content)
                } else {
                    expand::expand_heredoc_text(state, registry, &hd.content)
                        .map_err(|e| CommandOutput::stderr_msg(format!("bash: {e}\n"), 1))?
                };
                plan.stdin_override = Some(content.into_bytes());
            }
            _ => {}
        }
    }
    Ok(plan)
}

/// Applies the redirection targets to a just-produced output: bytes routed
/// to a file/append target are diverted there and removed from the
/// in-memory stream (consistent with real shell redirection semantics).
fn apply_redir_plan(state: &mut State, plan: &RedirPlan, output: &mut CommandOutput) {
    if plan.merge_stderr_to_stdout {
        output.stdout.extend(std::mem::take(&mut output.stderr));
    }
    if let Some((path, append)) = &plan.stdout_target {
        let bytes = std::mem::take(&mut output.stdout);
        if let Err(e) = state.env.fs.write_file(&state.env.cwd, path, bytes, *append, 0) {
            output.stderr.extend(format!("bash: {path}: {e}\n").into_bytes());
            output.exit = 1;
        }
    }
    if let Some((path, append)) = &plan.stderr_target {
        let bytes = std::mem::take(&mut output.stderr);
        if let Err(e) = state.env.fs.write_file(&state.env.cwd, path, bytes, *append, 0) {
            output.stderr.extend(format!("bash: {path}: {e}\n").into_bytes());
            output.exit = 1;
        }
    }
}

fn exec_simple(state: &mut State, registry: &BuiltinRegistry, sc: &shsh_syntax::ast::SimpleCommand, stdin: &[u8]) -> CommandOutput {
    let plan = match build_redir_plan(state, registry, &sc.redirs) {
        Ok(plan) => plan,
        Err(out) => return out,
    };
    let effective_stdin: &[u8] = plan.stdin_override.as_deref().unwrap_or(stdin);

    if sc.words.is_empty() {
        let mut out = CommandOutput::success();
        for assign in &sc.assigns {
            if let Err(e) = apply_assignment(state, registry, assign) {
                return CommandOutput::stderr_msg(format!("bash: {e}\n"), 1);
            }
        }
        apply_redir_plan(state, &plan, &mut out);
        return out;
    }

    let mut saved: Vec<(String, Option<shsh_env::Variable>)> = Vec::new();
    for assign in &sc.assigns {
        saved.push((assign.name.clone(), state.env.vars.get(&assign.name).cloned()));
        if let Err(e) = apply_assignment(state, registry, assign) {
            return CommandOutput::stderr_msg(format!("bash: {e}\n"), 1);
        }
    }

    let argv = match expand::expand_words(state, registry, &sc.words) {
        Ok(a) => a,
        Err(e) => {
            restore_assigns(state, saved);
            return CommandOutput::stderr_msg(format!("bash: {e}\n"), 1);
        }
    };

    tracing::trace!(argv = ?argv, "expanded simple command");
    let trace = if state.env.shell_opts.contains(ShellOpt::Xtrace) {
        let line = argv.iter().map(|a| shsh_quote::quote(a).into_owned()).collect::<Vec<_>>().join(" ");
        format!("+ {line}\n")
    } else {
        String::new()
    };

    let name = &argv[0];
    let mut output = if let Some(func) = state.functions.get(name).cloned() {
        call_function(state, registry, &func, &argv, effective_stdin)
    } else if let Some(builtin) = registry.get(name) {
        tracing::debug!(command = name.as_str(), "dispatching builtin");
        builtin.execute(state, registry, &argv, effective_stdin)
    } else {
        CommandOutput::stderr_msg(format!("bash: {name}: command not found\n"), 127)
    };

    if !trace.is_empty() {
        let mut stderr = trace.into_bytes();
        stderr.extend(std::mem::take(&mut output.stderr));
        output.stderr = stderr;
    }

    restore_assigns(state, saved);
    apply_redir_plan(state, &plan, &mut output);
    output
}

fn restore_assigns(state: &mut State, saved: Vec<(String, Option<shsh_env::Variable>)>) {
    for (name, var) in saved {
        match var {
            Some(v) => {
                state.env.vars.set(&name, v).ok();
            }
            None => {
                state.env.vars.unset(&name).ok();
            }
        }
    }
}

fn apply_assignment(state: &mut State, registry: &BuiltinRegistry, assign: &shsh_syntax::ast::Assign) -> Result<(), String> {
    match &assign.value {
        shsh_syntax::ast::AssignValue::Scalar(word) => {
            let value = expand::expand_assignment_value(state, registry, word).map_err(|e| e.to_string())?;
            state.env.vars.set_scalar(&assign.name, value)
        }
        shsh_syntax::ast::AssignValue::Array(words) => {
            let values = expand::expand_array_literal(state, registry, words).map_err(|e| e.to_string())?;
            state
                .env
                .vars
                .set(&assign.name, shsh_env::Variable::array(values))
        }
    }
}

fn call_function(
    state: &mut State,
    registry: &BuiltinRegistry,
    body: &FullCompoundCommand,
    argv: &[String],
    stdin: &[u8],
) -> CommandOutput {
    let saved_positional = std::mem::replace(&mut state.env.positional, argv[1..].to_vec());
    state.push_call_frame();
    let mut output = exec_full_compound(state, registry, body, stdin);
    state.pop_call_frame();
    state.env.positional = saved_positional;
    if let Some(ControlSignal::Return(n)) = output.signal {
        output.exit = n;
        output.signal = None;
    }
    output
}

fn exec_full_compound(state: &mut State, registry: &BuiltinRegistry, fc: &FullCompoundCommand, stdin: &[u8]) -> CommandOutput {
    let plan = match build_redir_plan(state, registry, &fc.redirs) {
        Ok(plan) => plan,
        Err(out) => return out,
    };
    let effective_stdin: &[u8] = plan.stdin_override.as_deref().unwrap_or(stdin);
    let mut output = exec_compound(state, registry, &fc.command, effective_stdin);
    apply_redir_plan(state, &plan, &mut output);
    output
}

fn loop_budget_warning() -> Vec<u8> {
    b"bash: loop iteration limit exceeded\n".to_vec()
}

/// Advances a loop's accumulated output/signal by one iteration's result;
/// returns `true` if the enclosing loop should stop.
fn fold_loop_iteration(acc: &mut CommandOutput, out: CommandOutput) -> bool {
    acc.stdout.extend(out.stdout);
    acc.stderr.extend(out.stderr);
    acc.exit = out.exit;
    match out.signal {
        Some(ControlSignal::Break(n)) => {
            if n > 1 {
                acc.signal = Some(ControlSignal::Break(n - 1));
            }
            true
        }
        Some(ControlSignal::Continue(n)) => {
            if n > 1 {
                acc.signal = Some(ControlSignal::Continue(n - 1));
                true
            } else {
                false
            }
        }
        Some(other) => {
            acc.signal = Some(other);
            true
        }
        None => false,
    }
}

fn exec_compound(state: &mut State, registry: &BuiltinRegistry, cc: &CompoundCommand, stdin: &[u8]) -> CommandOutput {
    match cc {
        CompoundCommand::Grouping(list) => exec_list(state, registry, list, stdin, true),
        CompoundCommand::Subshell(list) => {
            let mut sub = state.clone();
            exec_list(&mut sub, registry, list, stdin, true)
        }
        CompoundCommand::For { name, words, body } => {
            let items = match words {
                Some(ws) => match expand::expand_words(state, registry, ws) {
                    Ok(v) => v,
                    Err(e) => return CommandOutput::stderr_msg(format!("bash: {e}\n"), 1),
                },
                None => state.env.positional.clone(),
            };
            let mut acc = CommandOutput::success();
            for (i, item) in items.into_iter().enumerate() {
                if i as u32 >= state.loop_iteration_limit {
                    acc.stderr.extend(loop_budget_warning());
                    break;
                }
                if let Err(e) = state.env.vars.set_scalar(name, item) {
                    acc.stderr.extend(format!("bash: {e}\n").into_bytes());
                    acc.exit = 1;
                    break;
                }
                let out = exec_list(state, registry, body, &[], true);
                if fold_loop_iteration(&mut acc, out) {
                    break;
                }
            }
            acc
        }
        CompoundCommand::While { condition, body } => exec_while_until(state, registry, condition, body, true),
        CompoundCommand::Until { condition, body } => exec_while_until(state, registry, condition, body, false),
        CompoundCommand::If { clauses, else_part } => {
            for clause in clauses {
                let cond = exec_list(state, registry, &clause.condition, stdin, false);
                if cond.signal.is_some() {
                    return cond;
                }
                if cond.exit == 0 {
                    return exec_list(state, registry, &clause.body, &[], true);
                }
            }
            match else_part {
                Some(list) => exec_list(state, registry, list, &[], true),
                None => CommandOutput::success(),
            }
        }
        CompoundCommand::Case { subject, items } => {
            let value = match expand::expand_assignment_value(state, registry, subject) {
                Ok(v) => v,
                Err(e) => return CommandOutput::stderr_msg(format!("bash: {e}\n"), 1),
            };
            for item in items {
                for pat_word in &item.patterns {
                    let pattern = match expand::expand_pattern(state, registry, pat_word) {
                        Ok(p) => p,
                        Err(e) => return CommandOutput::stderr_msg(format!("bash: {e}\n"), 1),
                    };
                    match shsh_fnmatch::matches(&pattern, &value) {
                        Ok(true) => return exec_list(state, registry, &item.body, &[], true),
                        Ok(false) => {}
                        Err(e) => return CommandOutput::stderr_msg(format!("bash: {e}\n"), 1),
                    }
                }
            }
            CommandOutput::success()
        }
        CompoundCommand::Conditional(words) => match conditional::eval(state, registry, words) {
            Ok(true) => CommandOutput::success(),
            Ok(false) => CommandOutput::with_exit(1),
            Err(e) => CommandOutput::stderr_msg(format!("bash: {e}\n"), 2),
        },
        CompoundCommand::Arithmetic(word) => {
            let text = match expand::expand_assignment_value(state, registry, word) {
                Ok(t) => t,
                Err(e) => return CommandOutput::stderr_msg(format!("bash: {e}\n"), 1),
            };
            let mut vars = StateVars(state);
            match shsh_arith::eval(&text, &mut vars) {
                Ok(v) => CommandOutput::with_exit(if v != 0 { 0 } else { 1 }),
                Err(e) => CommandOutput::stderr_msg(format!("bash: {e}\n"), 1),
            }
        }
    }
}

fn exec_while_until(
    state: &mut State,
    registry: &BuiltinRegistry,
    condition: &List,
    body: &List,
    while_true: bool,
) -> CommandOutput {
    let mut acc = CommandOutput::success();
    let mut i = 0u32;
    loop {
        if i >= state.loop_iteration_limit {
            acc.stderr.extend(loop_budget_warning());
            break;
        }
        i += 1;
        let cond = exec_list(state, registry, condition, &[], false);
        if cond.signal.is_some() {
            acc.signal = cond.signal;
            break;
        }
        let keep_going = if while_true { cond.exit == 0 } else { cond.exit != 0 };
        if !keep_going {
            break;
        }
        let out = exec_list(state, registry, body, &[], true);
        if fold_loop_iteration(&mut acc, out) {
            break;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use shsh_env::{Env, Options};

    fn run(src: &str) -> CommandOutput {
        let list = shsh_syntax::parse(src).unwrap();
        let mut state = State::new(Env::new(Options::new()));
        let registry = BuiltinRegistry::new();
        exec_list(&mut state, &registry, &list, &[], true)
    }

    fn run_with<F>(src: &str, setup: F) -> CommandOutput
    where
        F: FnOnce(&mut BuiltinRegistry),
    {
        let list = shsh_syntax::parse(src).unwrap();
        let mut state = State::new(Env::new(Options::new()));
        let mut registry = BuiltinRegistry::new();
        setup(&mut registry);
        exec_list(&mut state, &registry, &list, &[], true)
    }

    fn echo_builtin(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
        let _ = state;
        let mut out = argv[1..].join(" ").into_bytes();
        out.push(b'\n');
        CommandOutput {
            stdout: out,
            ..CommandOutput::success()
        }
    }

    fn true_builtin(_state: &mut State, _registry: &BuiltinRegistry, _argv: &[String], _stdin: &[u8]) -> CommandOutput {
        CommandOutput::success()
    }

    fn false_builtin(_state: &mut State, _registry: &BuiltinRegistry, _argv: &[String], _stdin: &[u8]) -> CommandOutput {
        CommandOutput::with_exit(1)
    }

    fn return_builtin(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
        let code = argv.get(1).map(|n| shsh_arith::coerce(Some(n)) as i32).unwrap_or(state.env.last_exit);
        CommandOutput {
            exit: code,
            signal: Some(ControlSignal::Return(code)),
            ..CommandOutput::success()
        }
    }

    #[test]
    fn assignment_persists_without_words() {
        let mut state = State::new(Env::new(Options::new()));
        let registry = BuiltinRegistry::new();
        let list = shsh_syntax::parse("X=hello\n").unwrap();
        exec_list(&mut state, &registry, &list, &[], true);
        assert_eq!(state.env.vars.get_scalar("X"), Some("hello"));
    }

    #[test]
    fn and_or_short_circuits() {
        let out = run_with("false || echo rescued\n", |r| {
            r.register("echo", Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
            r.register("false", Rc::new(false_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
        });
        assert_eq!(String::from_utf8_lossy(&out.stdout), "rescued\n");
    }

    #[test]
    fn command_not_found_exits_127() {
        let out = run("totally-bogus-command\n");
        assert_eq!(out.exit, 127);
    }

    #[test]
    fn pipeline_pipes_stdout_between_stages() {
        fn cat_builtin(_state: &mut State, _registry: &BuiltinRegistry, _argv: &[String], stdin: &[u8]) -> CommandOutput {
            CommandOutput {
                stdout: stdin.to_vec(),
                ..CommandOutput::success()
            }
        }
        let out = run_with("echo hi | cat\n", |r| {
            r.register("echo", Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
            r.register("cat", Rc::new(cat_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
        });
        assert_eq!(String::from_utf8_lossy(&out.stdout), "hi\n");
    }

    #[test]
    fn if_runs_matching_branch() {
        let out = run_with(
            "if true; then echo yes; else echo no; fi\n",
            |r| {
                r.register("echo", Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
                r.register("true", Rc::new(true_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
            },
        );
        assert_eq!(String::from_utf8_lossy(&out.stdout), "yes\n");
    }

    #[test]
    fn for_loop_iterates_words() {
        let out = run_with("for x in a b c; do echo $x; done\n", |r| {
            r.register("echo", Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
        });
        assert_eq!(String::from_utf8_lossy(&out.stdout), "a\nb\nc\n");
    }

    #[test]
    fn break_stops_for_loop() {
        let out = run_with(
            "for x in a b c; do if [[ $x = b ]]; then break; fi; echo $x; done\n",
            |r| {
                r.register("echo", Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
            },
        );
        assert_eq!(String::from_utf8_lossy(&out.stdout), "a\n");
    }

    #[test]
    fn case_matches_first_pattern() {
        let out = run_with(
            "case hello in h*) echo matched;; *) echo fallback;; esac\n",
            |r| {
                r.register("echo", Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
            },
        );
        assert_eq!(String::from_utf8_lossy(&out.stdout), "matched\n");
    }

    #[test]
    fn function_call_returns_exit_code() {
        let out = run_with(
            "f() { return 3; }\nf\n",
            |r| {
                r.register("return", Rc::new(return_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
            },
        );
        assert_eq!(out.exit, 3);
    }

    #[test]
    fn errexit_halts_script() {
        let out = run_with(
            "set -e\nfalse\necho after\n",
            |r| {
                r.register("echo", Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
                r.register("false", Rc::new(false_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
                r.register("set", Rc::new(|state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]| {
                    if argv.get(1).map(String::as_str) == Some("-e") {
                        state.env.shell_opts.insert(ShellOpt::Errexit);
                    }
                    CommandOutput::success()
                } as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
            },
        );
        assert!(!String::from_utf8_lossy(&out.stdout).contains("after"));
    }

    #[test]
    fn errexit_does_not_abort_on_a_failing_and_or_list() {
        let out = run_with(
            "set -e\nfalse && true\necho next\n",
            |r| {
                r.register("echo", Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
                r.register("true", Rc::new(true_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
                r.register("false", Rc::new(false_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
                r.register("set", Rc::new(|state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]| {
                    if argv.get(1).map(String::as_str) == Some("-e") {
                        state.env.shell_opts.insert(ShellOpt::Errexit);
                    }
                    CommandOutput::success()
                } as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput));
            },
        );
        assert!(String::from_utf8_lossy(&out.stdout).contains("next"));
    }

    #[test]
    fn redirection_writes_to_file() {
        let mut state = State::new(Env::new(Options::new()));
        let mut registry = BuiltinRegistry::new();
        registry.register(
            "echo",
            Rc::new(echo_builtin as fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput),
        );
        let list = shsh_syntax::parse("echo hi > /home/user/out.txt\n").unwrap();
        exec_list(&mut state, &registry, &list, &[], true);
        let content = state.env.fs.read_file(&state.env.cwd, "/home/user/out.txt").unwrap();
        assert_eq!(content, b"hi\n");
    }
}
