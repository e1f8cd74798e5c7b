//! Assembles the environment, shell options, cwd, positional parameters,
//! trap table and virtual filesystem into one [`Env`] value that is cheap to
//! clone for subshell isolation (everything inside is plain owned data).

use itertools::Itertools;

use crate::opts::ShellOpts;
use crate::options::{adapter_from_seed, Options};
use crate::variable::{Value, VarTable, Variable};
use crate::vfs::Fs;

/// Sandboxed shell execution state: variables, positional parameters, shell
/// options, cwd, the virtual filesystem, the last exit code, and the trap
/// table. Function bodies are **not** stored here — they are an AST type
/// from `shsh-syntax`, which this crate does not depend on; `shsh-semantics`
/// layers a function table on top of `Env`.
#[derive(Clone, Debug)]
pub struct Env {
    pub vars: VarTable,
    pub cwd: String,
    pub fs: Fs,
    pub last_exit: i32,
    pub shell_opts: ShellOpts,
    pub positional: Vec<String>,
    /// Signal/condition name -> trap command source text.
    pub traps: std::collections::HashMap<String, String>,
    pub http: Option<crate::options::HttpCapability>,
    /// Deterministic process-id-like values (`$$`/`$!`), seeded rather than
    /// sourced from the OS per §6.4.
    pub pid: u32,
    pub last_bg_pid: Option<u32>,
}

impl Env {
    pub fn new(options: Options) -> Self {
        let mut fs = Fs::new();
        fs.ensure_dir_all(&options.cwd).ok();
        for (path, seed) in &options.files {
            if let Some(parent) = crate::path::split_parent(&crate::path::normalize(path)) {
                fs.ensure_dir_all(&parent.0).ok();
            }
            let (bytes, adapter) = adapter_from_seed(seed);
            if let Some(bytes) = bytes {
                fs.write_file("/", path, bytes, false, 0).ok();
            } else if let Some(adapter) = adapter {
                fs.install_adapter(path, adapter).ok();
            }
        }

        let mut vars = VarTable::new();
        vars.set_scalar("HOME", "/home/user").ok();
        vars.set_scalar("PATH", "/bin:/usr/bin").ok();
        vars.set_scalar("IFS", " \t\n").ok();
        vars.set_scalar("PWD", &options.cwd).ok();
        vars.set_scalar("?", "0").ok();
        for (name, value) in &options.env {
            vars.set_scalar(name, value.clone()).ok();
            vars.mark_exported(name);
        }
        vars.mark_exported("HOME");
        vars.mark_exported("PATH");
        vars.mark_exported("PWD");

        Env {
            vars,
            cwd: options.cwd,
            fs,
            last_exit: 0,
            shell_opts: options.shell_opts,
            positional: Vec::new(),
            traps: std::collections::HashMap::new(),
            http: options.http,
            pid: 1000,
            last_bg_pid: None,
        }
    }

    pub fn set_cwd(&mut self, cwd: String) {
        self.cwd = cwd.clone();
        self.vars.set_scalar("PWD", cwd).ok();
    }

    pub fn set_last_exit(&mut self, code: i32) {
        self.last_exit = code;
        self.vars.set_scalar("?", code.to_string()).ok();
    }

    /// A flat `name=value` string map, including flattened array entries
    /// (`name[i]`), for the host-API `Result.env` field.
    pub fn flat_env(&self) -> std::collections::HashMap<String, String> {
        self.vars.flatten()
    }

    /// Reconstructs the current variable table as re-parseable assignment
    /// text, the engine behind `declare -p`/`export -p`/bare `set` (§2.2).
    pub fn reconstruct_assignments(&self, exported_only: bool) -> String {
        let iter: Box<dyn Iterator<Item = (&str, &Variable)>> = if exported_only {
            Box::new(self.vars.exported_iter())
        } else {
            Box::new(self.vars.iter_in_order())
        };
        iter.map(|(name, var)| match &var.value {
            Value::Scalar(s) => format!("{name}={}", shsh_quote::quote(s)),
            Value::Array(items) => {
                let body = items.iter().map(|s| shsh_quote::quote(s)).join(" ");
                format!("{name}=({body})")
            }
        })
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_variables() {
        let env = Env::new(Options::new());
        assert_eq!(env.vars.get_scalar("HOME"), Some("/home/user"));
        assert_eq!(env.vars.get_scalar("IFS"), Some(" \t\n"));
        assert_eq!(env.vars.get_scalar("?"), Some("0"));
        assert_eq!(env.cwd, "/home/user");
    }

    #[test]
    fn seeded_files_are_readable() {
        let options = Options::new().with_file("/home/user/a.txt", "hello\n");
        let env = Env::new(options);
        assert_eq!(env.fs.read_file(&env.cwd, "/home/user/a.txt").unwrap(), b"hello\n");
    }

    #[test]
    fn set_last_exit_updates_question_mark() {
        let mut env = Env::new(Options::new());
        env.set_last_exit(7);
        assert_eq!(env.vars.get_scalar("?"), Some("7"));
    }

    #[test]
    fn reconstruct_assignments_quotes_values() {
        let mut env = Env::new(Options::new());
        env.vars.set_scalar("GREETING", "hello world").unwrap();
        let text = env.reconstruct_assignments(false);
        assert!(text.contains("GREETING='hello world'"));
    }
}
