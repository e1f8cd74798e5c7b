//! `getopts optstring name [arg...]` (§2.2): a minimal short-option parser
//! for script loops, walking `$@` (or the given `arg...`) one option per
//! call using `OPTIND`/`OPTARG` as the cursor, the same contract bash's
//! builtin exposes.

use shsh_semantics::{BuiltinRegistry, CommandOutput, State};

pub fn main(state: &mut State, _registry: &BuiltinRegistry, argv: &[String], _stdin: &[u8]) -> CommandOutput {
    let (Some(optstring), Some(var_name)) = (argv.get(1), argv.get(2)) else {
        return CommandOutput::stderr_msg(b"bash: getopts: usage: getopts optstring name [arg...]\n".to_vec(), 2);
    };
    let args: Vec<String> = if argv.len() > 3 {
        argv[3..].to_vec()
    } else {
        state.env.positional.clone()
    };

    let silent = optstring.starts_with(':');
    let optstring = optstring.trim_start_matches(':');

    let optind: usize = state
        .env
        .vars
        .get_scalar("OPTIND")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let idx = optind.saturating_sub(1);

    let done = |state: &mut State, var_name: &str, optind: usize| {
        state.env.vars.set_scalar(var_name, "?").ok();
        state.env.vars.set_scalar("OPTIND", optind.to_string()).ok();
        CommandOutput::with_exit(1)
    };

    let Some(arg) = args.get(idx) else {
        return done(state, var_name, optind);
    };
    if arg == "--" {
        return done(state, var_name, optind + 1);
    }
    if !arg.starts_with('-') || arg.len() < 2 {
        return done(state, var_name, optind);
    }

    let opt_char = arg.chars().nth(1).unwrap();
    let Some(pos) = optstring.find(opt_char) else {
        state.env.vars.set_scalar(var_name, "?").ok();
        state.env.vars.set_scalar("OPTARG", opt_char.to_string()).ok();
        state.env.vars.set_scalar("OPTIND", (optind + 1).to_string()).ok();
        return if silent {
            CommandOutput::success()
        } else {
            CommandOutput { exit: 0, ..CommandOutput::stderr_msg(format!("bash: getopts: illegal option -- {opt_char}\n"), 0) }
        };
    };

    let needs_arg = optstring.as_bytes().get(pos + 1) == Some(&b':');
    if !needs_arg {
        state.env.vars.set_scalar("OPTIND", (optind + 1).to_string()).ok();
        state.env.vars.set_scalar(var_name, opt_char.to_string()).ok();
        return CommandOutput::success();
    }

    if arg.len() > 2 {
        state.env.vars.set_scalar("OPTARG", arg[2..].to_string()).ok();
        state.env.vars.set_scalar("OPTIND", (optind + 1).to_string()).ok();
    } else if let Some(next) = args.get(idx + 1) {
        state.env.vars.set_scalar("OPTARG", next.clone()).ok();
        state.env.vars.set_scalar("OPTIND", (optind + 2).to_string()).ok();
    } else {
        state.env.vars.set_scalar(var_name, if silent { ":" } else { "?" }).ok();
        state.env.vars.set_scalar("OPTARG", opt_char.to_string()).ok();
        state.env.vars.set_scalar("OPTIND", (optind + 1).to_string()).ok();
        return if silent {
            CommandOutput::success()
        } else {
            CommandOutput {
                exit: 0,
                ..CommandOutput::stderr_msg(format!("bash: getopts: option requires an argument -- {opt_char}\n"), 0)
            }
        };
    }

    state.env.vars.set_scalar(var_name, opt_char.to_string()).ok();
    CommandOutput::success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shsh_env::{Env, Options};

    fn state_with_positional(args: &[&str]) -> State {
        let mut state = State::new(Env::new(Options::new()));
        state.env.positional = args.iter().map(|s| s.to_string()).collect();
        state
    }

    #[test]
    fn parses_a_flag_then_an_argument_option() {
        let mut state = state_with_positional(&["-v", "-o", "out.txt", "rest"]);
        let registry = BuiltinRegistry::new();
        let argv = vec!["getopts".into(), "vo:".into(), "opt".into()];

        let out = main(&mut state, &registry, &argv, &[]);
        assert_eq!(out.exit, 0);
        assert_eq!(state.env.vars.get_scalar("opt"), Some("v"));
        assert_eq!(state.env.vars.get_scalar("OPTIND"), Some("2"));

        let out = main(&mut state, &registry, &argv, &[]);
        assert_eq!(out.exit, 0);
        assert_eq!(state.env.vars.get_scalar("opt"), Some("o"));
        assert_eq!(state.env.vars.get_scalar("OPTARG"), Some("out.txt"));
        assert_eq!(state.env.vars.get_scalar("OPTIND"), Some("4"));

        let out = main(&mut state, &registry, &argv, &[]);
        assert_eq!(out.exit, 1);
        assert_eq!(state.env.vars.get_scalar("opt"), Some("?"));
    }

    #[test]
    fn unknown_option_sets_question_mark_and_continues() {
        let mut state = state_with_positional(&["-z"]);
        let registry = BuiltinRegistry::new();
        let argv = vec!["getopts".into(), "v".into(), "opt".into()];
        let out = main(&mut state, &registry, &argv, &[]);
        assert_eq!(out.exit, 0);
        assert_eq!(state.env.vars.get_scalar("opt"), Some("?"));
    }
}
