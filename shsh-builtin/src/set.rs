//! `set`: toggles shell options (`-e`/`-u`/`-o pipefail`/`-x`/`-f` and their
//! `+`-prefixed opposites), replaces the positional parameters after `--` or
//! a non-option operand, or — given no arguments at all — reconstructs the
//! current variable table as assignment text (§2.2).

use shsh_env::ShellOpt;
use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

fn opt_for_letter(c: char) -> Option<ShellOpt> {
    match c {
        'e' => Some(ShellOpt::Errexit),
        'u' => Some(ShellOpt::Nounset),
        'x' => Some(ShellOpt::Xtrace),
        'f' => Some(ShellOpt::Noglob),
        _ => None,
    }
}

fn opt_for_name(name: &str) -> Option<ShellOpt> {
    match name {
        "errexit" => Some(ShellOpt::Errexit),
        "nounset" => Some(ShellOpt::Nounset),
        "pipefail" => Some(ShellOpt::Pipefail),
        "xtrace" => Some(ShellOpt::Xtrace),
        "noglob" => Some(ShellOpt::Noglob),
        _ => None,
    }
}

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let args = &argv[1..];
    let mut i = 0;
    let mut consumed_operand = false;
    while i < args.len() {
        let arg = &args[i];
        if arg == "--" {
            i += 1;
            consumed_operand = true;
            break;
        }
        if arg == "-o" || arg == "+o" {
            let enable = arg.starts_with('-');
            i += 1;
            let Some(name) = args.get(i) else {
                return CommandOutput::stderr_msg(b"bash: set: -o: option name required\n".to_vec(), 2);
            };
            match opt_for_name(name) {
                Some(opt) if enable => state.env.shell_opts.insert(opt),
                Some(opt) => state.env.shell_opts.remove(opt),
                None => return CommandOutput::stderr_msg(format!("bash: set: -o: unknown option `{name}'\n"), 2),
            };
            i += 1;
            continue;
        }
        let is_cluster = (arg.starts_with('-') || arg.starts_with('+')) && arg.len() > 1;
        if !is_cluster {
            consumed_operand = true;
            break;
        }
        let enable = arg.starts_with('-');
        for c in arg[1..].chars() {
            match opt_for_letter(c) {
                Some(opt) if enable => state.env.shell_opts.insert(opt),
                Some(opt) => state.env.shell_opts.remove(opt),
                None => return CommandOutput::stderr_msg(format!("bash: set: unknown option `-{c}'\n"), 2),
            };
        }
        i += 1;
    }

    if consumed_operand {
        state.env.positional = args[i..].to_vec();
        return CommandOutput::success();
    }

    if args.is_empty() {
        let text = state.env.reconstruct_assignments(false);
        let mut stdout = text.into_bytes();
        if !stdout.is_empty() {
            stdout.push(b'\n');
        }
        return CommandOutput {
            stdout,
            ..CommandOutput::success()
        };
    }

    CommandOutput::success()
}
