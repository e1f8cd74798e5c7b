//! End-to-end scenarios against the public host API — the crate-root
//! integration tests the ambient stack calls for alongside the colocated
//! unit tests in `src/`.

use assert_matches::assert_matches;

fn run(source: &str) -> shsh::ExecResult {
    let state = shsh::new(shsh::Options::new());
    let (result, _state) = shsh::exec(state, source);
    result
}

#[test]
fn pipeline_with_builtins_filters_lines() {
    let result = run("printf 'a\\nb\\nab\\n' | grep a\n");
    assert_eq!(result.stdout, "a\nab\n");
    assert_eq!(result.exit_code, 0);
}

#[test]
fn array_literal_assignment_expands_all_elements() {
    let result = run("arr=(one two three)\nfor x in \"${arr[@]}\"; do echo $x; done\n");
    assert_eq!(result.stdout, "one\ntwo\nthree\n");
}

#[test]
fn function_with_local_and_return_code() {
    let script = "greet() { local name=$1; echo \"hi $name\"; return 3; }\ngreet world\necho $?\n";
    let result = run(script);
    assert_eq!(result.stdout, "hi world\n3\n");
    assert_eq!(result.exit_code, 0);
}

#[test]
fn getopts_walks_positional_options_across_calls() {
    let script = "set -- -v -n 5 rest\nwhile getopts vn: opt; do\n  case $opt in\n    v) echo verbose ;;\n    n) echo \"n=$OPTARG\" ;;\n  esac\ndone\n";
    let result = run(script);
    assert_eq!(result.stdout, "verbose\nn=5\n");
}

#[test]
fn sandbox_writes_and_reads_a_file() {
    let result = run("echo hello > greeting.txt\ncat greeting.txt\n");
    assert_eq!(result.stdout, "hello\n");
    assert_eq!(result.exit_code, 0);
}

#[test]
fn redirecting_into_a_missing_directory_reports_failure() {
    let result = run("echo hi > /nonexistent/f\n");
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.starts_with("bash: /nonexistent/f: "));
}

#[test]
fn exit_code_and_env_surface_after_a_failed_command() {
    let result = run("false\n");
    assert_eq!(result.exit_code, 1);
    assert_matches!(result.env.get("?"), Some(code) if code == "1");
}

#[test]
fn parse_error_is_reported_without_executing() {
    let result = run("if true; then echo a\n");
    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.starts_with("bash: "));
}
