//! The `shsh` command-line driver (§6.5): runs a script file, an inline
//! `-c` string, or stdin, against a freshly constructed sandbox, and writes
//! the captured result to the real process streams. This binary is the
//! only place in the crate allowed to touch actual process I/O.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Sandboxed POSIX shell interpreter.
#[derive(Parser, Debug)]
#[command(name = "shsh", version, about)]
struct Cli {
    /// Script file to run. If omitted (and `-c` is not given), reads from stdin.
    script_file: Option<PathBuf>,

    /// Run `command` as an inline script instead of reading a file.
    #[arg(short = 'c', value_name = "command")]
    command: Option<String>,
}

fn read_source(cli: &Cli) -> std::io::Result<String> {
    if let Some(command) = &cli.command {
        return Ok(command.clone());
    }
    if let Some(path) = &cli.script_file {
        return std::fs::read_to_string(path);
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let source = match read_source(&cli) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("shsh: {e}");
            return ExitCode::from(1);
        }
    };

    let state = shsh::new(shsh::Options::new());
    let (result, _state) = shsh::exec(state, &source);
    print!("{}", result.stdout);
    eprint!("{}", result.stderr);
    ExitCode::from(result.exit_code.clamp(0, 255) as u8)
}
