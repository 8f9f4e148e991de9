//! scope-backtrace: run `bta` and friends against a captured debugger session.

use anyhow::Context;
use clap::Parser;
use scope_backtrace::interp::{init_module, run_repl, CommandInterpreter, CommandReturn};
use scope_backtrace::{RenderOptions, SnapshotHost};
use std::io;
use std::path::PathBuf;

/// Stack traces annotated with assertion scopes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session snapshot or DAP stackTrace response (JSON)
    snapshot: PathBuf,

    /// Command to run; may be repeated. Starts a prompt when omitted
    #[arg(short, long = "command", value_name = "COMMAND")]
    commands: Vec<String>,

    /// Disable ANSI colors
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    ))
    .init();

    log::debug!("Snapshot: {}", args.snapshot.display());

    let mut host = SnapshotHost::load(&args.snapshot)
        .with_context(|| format!("could not load session from {}", args.snapshot.display()))?;

    let render = RenderOptions {
        color: !args.no_color,
        ..RenderOptions::default()
    };
    let mut interp = CommandInterpreter::with_render_options(render);
    init_module(&mut interp)?;

    if args.commands.is_empty() {
        let stdin = io::stdin();
        run_repl(&interp, &mut host, stdin.lock(), &mut io::stdout())?;
        return Ok(());
    }

    for command in &args.commands {
        let mut result = CommandReturn::new();
        let outcome = interp.handle_command(&mut host, command, &mut result);
        for line in result.lines() {
            println!("{}", line);
        }
        outcome.with_context(|| format!("command '{}' failed", command))?;
    }

    Ok(())
}
