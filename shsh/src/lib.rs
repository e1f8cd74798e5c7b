//! The sandboxed shell's public host API (§6.1): `new`, `exec`, `parse`,
//! `tokenize`. This is the only surface external embedders touch — the
//! lexer/parser (`shsh-syntax`), executor/expansion (`shsh-semantics`), and
//! builtins (`shsh-builtin`) are implementation details wired together here.

use std::collections::HashMap;

pub use shsh_env::options::{HttpCapability, Options, SeedFile};
pub use shsh_env::Env;
pub use shsh_semantics::State;
pub use shsh_syntax::ast::List as Script;
pub use shsh_syntax::error::{LexError, ParseError};
pub use shsh_syntax::token::Token;

/// The uniform result of running a script: captured stdout/stderr (decoded
/// lossily, since the sandbox's internal buffers are bytes but the host API
/// deals in text), the exit code, and a flattened view of the final
/// environment (§6.1).
#[derive(Clone, Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub env: HashMap<String, String>,
}

/// Builds a fresh sandbox: seeded files, env vars, cwd, shell options, and
/// (optionally) an HTTP egress capability, per §6.1/§6.4.
pub fn new(options: Options) -> State {
    State::new(Env::new(options))
}

/// Parses and runs `source` to completion against `state`, returning the
/// captured result and the mutated state (§6.1). `exit`/`return` at the top
/// level simply end the script early with their given status; they are not
/// errors.
pub fn exec(mut state: State, source: &str) -> (ExecResult, State) {
    let registry = shsh_builtin::register_all();
    let list = match shsh_syntax::parse(source) {
        Ok(list) => list,
        Err(e) => {
            let result = ExecResult {
                stdout: String::new(),
                stderr: format!("bash: {e}\n"),
                exit_code: 2,
                env: state.env.flat_env(),
            };
            return (result, state);
        }
    };

    let output = shsh_semantics::exec::exec_list(&mut state, &registry, &list, &[], true);
    state.env.set_last_exit(output.exit);
    let result = ExecResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.exit,
        env: state.env.flat_env(),
    };
    (result, state)
}

/// Parses `source` into a [`Script`] without executing it — for dry-runs
/// and tooling (§6.1).
pub fn parse(source: &str) -> Result<Script, ParseError> {
    shsh_syntax::parse(source)
}

/// Splits `source` into its token stream, including resolved heredoc bodies
/// (§6.1).
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    shsh_syntax::tokenize(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_a_simple_pipeline() {
        let state = new(Options::new());
        let (result, _state) = exec(state, "echo hi\n");
        assert_eq!(result.stdout, "hi\n");
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn errexit_stops_the_script() {
        let state = new(Options::new().with_opt(shsh_env::ShellOpt::Errexit));
        let (result, _state) = exec(state, "false\necho unreachable\n");
        assert_eq!(result.stdout, "");
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn local_shadows_then_restores_on_function_return() {
        let state = new(Options::new());
        let script = "f() { local x=in; echo $x; }\nx=out\nf\necho $x\n";
        let (result, _state) = exec(state, script);
        assert_eq!(result.stdout, "in\nout\n");
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn parse_reports_unterminated_quote() {
        assert!(parse("echo 'unterminated").is_err());
    }

    #[test]
    fn tokenize_produces_a_token_stream() {
        let tokens = tokenize("echo hi\n").unwrap();
        assert!(!tokens.is_empty());
    }

    #[test]
    fn command_not_found_exits_127() {
        let state = new(Options::new());
        let (result, _state) = exec(state, "not-a-real-command\n");
        assert_eq!(result.exit_code, 127);
        assert!(result.stderr.contains("command not found"));
    }
}
