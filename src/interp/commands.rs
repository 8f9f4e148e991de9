use super::{CommandContext, CommandError, CommandReturn};
use crate::annotator::{annotate_frames, render_lines};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

/// Print stack trace with assertion scopes
#[derive(Parser, Debug)]
#[command(name = "bta", disable_version_flag = true)]
struct BtaArgs {
    /// Only consider the innermost COUNT frames
    #[arg(short = 'c', long = "count", value_name = "COUNT")]
    count: Option<usize>,

    /// Do not color assertion scope lines
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

/// List or select threads
#[derive(Parser, Debug)]
#[command(name = "thread", disable_version_flag = true)]
struct ThreadArgs {
    #[command(subcommand)]
    action: ThreadAction,
}

#[derive(Subcommand, Debug)]
enum ThreadAction {
    /// Show all threads; the selected one is marked with '*'
    List,
    /// Make THREAD_ID the selected thread
    Select { thread_id: u64 },
}

/// Parse `tokens` with clap. `Ok(None)` means clap printed help into `result`.
fn parse_args<T: Parser>(
    tokens: &[String],
    result: &mut CommandReturn,
) -> Result<Option<T>, CommandError> {
    match T::try_parse_from(tokens) {
        Ok(args) => Ok(Some(args)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp) => {
            for line in e.to_string().lines() {
                result.append_output(line);
            }
            Ok(None)
        }
        Err(e) => Err(CommandError::InvalidArguments {
            command: tokens.first().cloned().unwrap_or_default(),
            message: e.to_string().trim_end().to_string(),
        }),
    }
}

/// `bta [-c COUNT] [--no-color]`
pub fn bta(
    ctx: &mut CommandContext<'_>,
    tokens: &[String],
    result: &mut CommandReturn,
) -> Result<(), CommandError> {
    let Some(args) = parse_args::<BtaArgs>(tokens, result)? else {
        return Ok(());
    };

    let thread = ctx.host.selected_thread()?;
    let mut frames = thread.frames();
    if let Some(count) = args.count {
        frames.truncate(count);
    }

    let mut opts = ctx.render;
    if args.no_color {
        opts.color = false;
    }

    for line in render_lines(&annotate_frames(&frames), &opts) {
        result.append_output(line);
    }
    Ok(())
}

/// `thread list` / `thread select <id>`
pub fn thread(
    ctx: &mut CommandContext<'_>,
    tokens: &[String],
    result: &mut CommandReturn,
) -> Result<(), CommandError> {
    let Some(args) = parse_args::<ThreadArgs>(tokens, result)? else {
        return Ok(());
    };

    match args.action {
        ThreadAction::List => {
            for t in ctx.host.threads() {
                let marker = if t.selected { '*' } else { ' ' };
                let name = t.name.as_deref().unwrap_or("<unnamed>");
                result.append_output(format!(
                    "{} thread #{}: {} ({} frames)",
                    marker, t.id, name, t.frame_count
                ));
            }
        }
        ThreadAction::Select { thread_id } => {
            ctx.host.select_thread(thread_id)?;
            result.append_output(format!("Selected thread #{}", thread_id));
        }
    }
    Ok(())
}
