//! Scenario tests against the registered builtin set through its public
//! surface (`register_all`), the crate-root counterpart to the colocated
//! unit tests in `src/`.

use shsh_env::{Env, Options};
use shsh_semantics::State;

fn new_state() -> State {
    State::new(Env::new(Options::new()))
}

fn run(state: &mut State, registry: &shsh_semantics::BuiltinRegistry, name: &str, args: &[&str], stdin: &[u8]) -> shsh_semantics::CommandOutput {
    let builtin = registry.get(name).unwrap_or_else(|| panic!("missing builtin: {name}"));
    let argv: Vec<String> = std::iter::once(name.to_string()).chain(args.iter().map(|s| s.to_string())).collect();
    builtin.execute(state, registry, &argv, stdin)
}

#[test]
fn grep_filters_matching_lines() {
    let registry = shsh_builtin::register_all();
    let mut state = new_state();
    let out = run(&mut state, &registry, "grep", &["needle"], b"a needle here\nno match\nanother needle\n");
    assert_eq!(out.stdout, b"a needle here\nanother needle\n");
    assert_eq!(out.exit, 0);
}

#[test]
fn sort_orders_lines_numerically_with_n_flag() {
    let registry = shsh_builtin::register_all();
    let mut state = new_state();
    let out = run(&mut state, &registry, "sort", &["-n"], b"10\n2\n1\n");
    assert_eq!(out.stdout, b"1\n2\n10\n");
}

#[test]
fn wc_counts_lines_words_and_bytes() {
    let registry = shsh_builtin::register_all();
    let mut state = new_state();
    let out = run(&mut state, &registry, "wc", &[], b"one two\nthree\n");
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.contains('2'), "expected a line count of 2 in {text:?}");
    assert!(text.contains('3'), "expected a word count of 3 in {text:?}");
}

#[test]
fn export_with_no_operands_lists_exported_variables() {
    let registry = shsh_builtin::register_all();
    let mut state = new_state();
    state.env.vars.set_scalar("FOO", "bar").ok();
    state.env.vars.mark_exported("FOO");
    let out = run(&mut state, &registry, "export", &[], &[]);
    assert!(String::from_utf8_lossy(&out.stdout).contains("export FOO=bar"));
}

#[test]
fn cd_updates_cwd_and_oldpwd() {
    let registry = shsh_builtin::register_all();
    let mut state = new_state();
    state.env.fs.ensure_dir_all("/home/user/project").ok();
    let out = run(&mut state, &registry, "cd", &["/home/user/project"], &[]);
    assert_eq!(out.exit, 0);
    assert_eq!(state.env.cwd, "/home/user/project");
    assert_eq!(state.env.vars.get_scalar("OLDPWD"), Some("/home/user"));
}
