//! The executor's view of shell state: `shsh_env::Env` (variables, cwd, VFS,
//! options) plus the function table, which lives here rather than in
//! `shsh-env` because function bodies are `shsh-syntax` AST nodes and
//! `shsh-env` does not depend on the syntax crate.

use std::collections::HashMap;
use std::rc::Rc;

use shsh_env::{Env, Variable};
use shsh_syntax::ast::FullCompoundCommand;

/// A non-error control-flow marker attached to a command's result: `break`,
/// `continue`, `return`, and `exit` do not raise, they propagate this
/// upward until a loop/function/script boundary consumes it (§4.5, §9).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlSignal {
    Break(u32),
    Continue(u32),
    Return(i32),
    Exit(i32),
}

/// The uniform result every builtin, function call, and AST node evaluation
/// produces: accumulated stdout/stderr bytes, an exit code, and an optional
/// control signal (§6.2).
#[derive(Clone, Debug, Default)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit: i32,
    pub signal: Option<ControlSignal>,
}

impl CommandOutput {
    pub fn success() -> Self {
        CommandOutput::default()
    }

    pub fn with_exit(exit: i32) -> Self {
        CommandOutput {
            exit,
            ..Default::default()
        }
    }

    pub fn stderr_msg(message: impl Into<Vec<u8>>, exit: i32) -> Self {
        CommandOutput {
            stderr: message.into(),
            exit,
            ..Default::default()
        }
    }
}

/// The contract every builtin satisfies (§6.2): read argv/stdin/state, emit
/// stdout/stderr/exit/control-signal, mutating state in place. The registry
/// is passed through so builtins that recurse into the executor (`source`,
/// `.`) can dispatch commands the same way the top-level executor does.
pub trait Builtin {
    fn execute(&self, state: &mut State, registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput;
}

impl<F> Builtin for F
where
    F: Fn(&mut State, &BuiltinRegistry, &[String], &[u8]) -> CommandOutput,
{
    fn execute(&self, state: &mut State, registry: &BuiltinRegistry, argv: &[String], stdin: &[u8]) -> CommandOutput {
        self(state, registry, argv, stdin)
    }
}

/// A static name -> builtin lookup table. User-defined functions are always
/// checked first by the executor; this registry is consulted only when no
/// function of that name exists, per §4.5/§9 ("no runtime loading").
#[derive(Clone, Default)]
pub struct BuiltinRegistry {
    builtins: HashMap<String, Rc<dyn Builtin>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, builtin: Rc<dyn Builtin>) {
        self.builtins.insert(name.into(), builtin);
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn Builtin>> {
        self.builtins.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }
}

/// Snapshot of a function-call frame's `local` declarations, restored when
/// the call returns (§4.5: "Function body env changes persist unless local
/// declared").
#[derive(Clone, Default)]
struct LocalFrame {
    saved: HashMap<String, Option<Variable>>,
}

#[derive(Clone)]
pub struct State {
    pub env: Env,
    pub functions: HashMap<String, Rc<FullCompoundCommand>>,
    /// Bounded at construction by the executor; re-checked on each loop
    /// iteration (§4.5 "iteration limit").
    pub loop_iteration_limit: u32,
    locals_stack: Vec<LocalFrame>,
}

impl State {
    pub fn new(env: Env) -> Self {
        State {
            env,
            functions: HashMap::new(),
            loop_iteration_limit: 1000,
            locals_stack: Vec::new(),
        }
    }

    pub fn push_call_frame(&mut self) {
        self.locals_stack.push(LocalFrame::default());
    }

    pub fn pop_call_frame(&mut self) {
        if let Some(frame) = self.locals_stack.pop() {
            for (name, saved) in frame.saved {
                match saved {
                    Some(var) => {
                        self.env.vars.set(&name, var).ok();
                    }
                    None => {
                        self.env.vars.unset(&name).ok();
                    }
                }
            }
        }
    }

    /// Declares `name` as local to the current call frame: the variable's
    /// current value (or absence) is saved for restoration when the frame
    /// pops, then the scalar is set to `value`.
    pub fn declare_local(&mut self, name: &str, value: Option<String>) {
        let existing = self.env.vars.get(name).cloned();
        if let Some(frame) = self.locals_stack.last_mut() {
            frame.saved.entry(name.to_string()).or_insert(existing);
        }
        if let Some(value) = value {
            self.env.vars.set_scalar(name, value).ok();
        }
    }

    pub fn in_function_call(&self) -> bool {
        !self.locals_stack.is_empty()
    }
}
