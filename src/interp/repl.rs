use super::{CommandInterpreter, CommandReturn};
use crate::host::DebugHost;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "(bta) ";

/// Read commands from `input` until EOF or `quit`, writing command output to
/// `output`. Errors from a command are reported and the loop continues.
pub fn run_repl<R: BufRead, W: Write>(
    interp: &CommandInterpreter,
    host: &mut dyn DebugHost,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        eprint!("{}", PROMPT);
        io::stderr().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();

        if matches!(trimmed, "q" | "quit" | "exit") {
            break;
        }

        let mut result = CommandReturn::new();
        let outcome = interp.handle_command(host, trimmed, &mut result);
        for out in result.lines() {
            writeln!(output, "{}", out)?;
        }
        if let Err(e) = outcome {
            log::warn!("Command '{}' failed: {}", trimmed, e);
            writeln!(output, "error: {}", e)?;
        }
        output.flush()?;
    }

    Ok(())
}
