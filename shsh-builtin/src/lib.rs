//! The builtin command set (§6.2): one module per command, registered into
//! a [`BuiltinRegistry`] by [`register_all`]. `[[ ]]` is not a builtin here
//! — it is a `CompoundCommand` variant the executor (`shsh-semantics::exec`)
//! evaluates directly via `shsh-semantics::conditional`.

mod awk;
mod r#break;
mod cat;
mod cd;
mod r#continue;
mod declare;
mod echo;
mod env;
mod exit;
mod export;
mod getopts;
mod grep;
mod printf;
mod pwd;
mod read;
mod r#return;
mod sed;
mod set;
mod shift;
mod sort;
mod source;
mod test;
mod trivial;
mod uniq;
mod unset;
mod wc;

use std::rc::Rc;

use shsh_semantics::BuiltinRegistry;

/// Populates a fresh registry with every builtin required by §6.2, plus the
/// small text-processing toolset (`grep`/`sed`/`awk`/`sort`/`wc`/`uniq`) the
/// spec names as examples of commands control-flow scripts lean on.
pub fn register_all() -> BuiltinRegistry {
    let mut registry = BuiltinRegistry::new();
    registry.register("true", Rc::new(trivial::r#true));
    registry.register("false", Rc::new(trivial::r#false));
    registry.register(":", Rc::new(trivial::colon));
    registry.register("cat", Rc::new(cat::main));
    registry.register("echo", Rc::new(echo::main));
    registry.register("printf", Rc::new(printf::main));
    registry.register("test", Rc::new(test::test));
    registry.register("[", Rc::new(test::bracket));
    registry.register("set", Rc::new(set::main));
    registry.register("export", Rc::new(export::main));
    registry.register("unset", Rc::new(unset::main));
    registry.register("read", Rc::new(read::main));
    registry.register("source", Rc::new(source::main));
    registry.register(".", Rc::new(source::main));
    registry.register("exit", Rc::new(exit::main));
    registry.register("return", Rc::new(r#return::main));
    registry.register("break", Rc::new(r#break::main));
    registry.register("continue", Rc::new(r#continue::main));
    registry.register("shift", Rc::new(shift::main));
    registry.register("cd", Rc::new(cd::main));
    registry.register("pwd", Rc::new(pwd::main));
    registry.register("env", Rc::new(env::env));
    registry.register("printenv", Rc::new(env::printenv));
    registry.register("grep", Rc::new(grep::main));
    registry.register("sed", Rc::new(sed::main));
    registry.register("awk", Rc::new(awk::main));
    registry.register("sort", Rc::new(sort::main));
    registry.register("wc", Rc::new(wc::main));
    registry.register("uniq", Rc::new(uniq::main));
    registry.register("declare", Rc::new(declare::main));
    registry.register("getopts", Rc::new(getopts::main));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_required_builtin() {
        let registry = register_all();
        for name in [
            "cat", "echo", "printf", "true", "false", ":", "test", "[", "set", "export", "unset", "read", "source",
            ".", "exit", "return", "break", "continue", "shift", "cd", "pwd", "env", "printenv", "declare", "getopts",
        ] {
            assert!(registry.contains(name), "missing builtin: {name}");
        }
    }
}
