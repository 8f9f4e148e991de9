//! A small command interpreter in the style of a debugger's script bridge.
//!
//! Commands are registered under a keyword and receive the session host,
//! the tokenized command line and a [`CommandReturn`] to write output into.

mod commands;
mod repl;

pub use commands::{bta, thread};
pub use repl::run_repl;

use crate::annotator::RenderOptions;
use crate::host::{DebugHost, HostError};
use std::collections::BTreeMap;
use thiserror::Error;

pub type CommandFn =
    fn(&mut CommandContext<'_>, &[String], &mut CommandReturn) -> Result<(), CommandError>;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("'{0}' is not a valid command")]
    UnknownCommand(String),

    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("unbalanced quotes in command line: {0}")]
    Parse(String),

    #[error("{command}: {message}")]
    InvalidArguments { command: String, message: String },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// What a command handler gets to work with.
pub struct CommandContext<'a> {
    pub host: &'a mut dyn DebugHost,
    pub render: RenderOptions,
}

/// Output sink for a single command invocation.
#[derive(Debug, Default, Clone)]
pub struct CommandReturn {
    lines: Vec<String>,
}

impl CommandReturn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_output(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

struct Command {
    help: String,
    handler: CommandFn,
}

pub struct CommandInterpreter {
    commands: BTreeMap<String, Command>,
    render: RenderOptions,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::with_render_options(RenderOptions::default())
    }

    pub fn with_render_options(render: RenderOptions) -> Self {
        Self {
            commands: BTreeMap::new(),
            render,
        }
    }

    pub fn add_command(
        &mut self,
        name: &str,
        help: &str,
        handler: CommandFn,
    ) -> Result<(), CommandError> {
        if name == "help" || self.commands.contains_key(name) {
            return Err(CommandError::DuplicateCommand(name.to_string()));
        }
        self.commands.insert(
            name.to_string(),
            Command {
                help: help.to_string(),
                handler,
            },
        );
        log::debug!("Registered command '{}'", name);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        name == "help" || self.commands.contains_key(name)
    }

    /// Registered command names, `help` included, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.push("help");
        names.sort_unstable();
        names
    }

    pub fn handle_command(
        &self,
        host: &mut dyn DebugHost,
        line: &str,
        result: &mut CommandReturn,
    ) -> Result<(), CommandError> {
        let mut lexer = shlex::Shlex::new(line);
        let tokens: Vec<String> = lexer.by_ref().collect();
        if lexer.had_error {
            return Err(CommandError::Parse(line.to_string()));
        }

        let Some(name) = tokens.first() else {
            return Ok(());
        };

        if name == "help" {
            self.print_help(result);
            return Ok(());
        }

        let command = self
            .commands
            .get(name.as_str())
            .ok_or_else(|| CommandError::UnknownCommand(name.clone()))?;

        log::debug!("Dispatching '{}' with {} argument(s)", name, tokens.len() - 1);
        let mut ctx = CommandContext {
            host,
            render: self.render,
        };
        (command.handler)(&mut ctx, &tokens, result)
    }

    fn print_help(&self, result: &mut CommandReturn) {
        result.append_output("Debugger commands:");
        for (name, command) in &self.commands {
            result.append_output(format!("  {:<8} -- {}", name, command.help));
        }
        result.append_output(format!("  {:<8} -- {}", "help", "List available commands."));
    }
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Register this crate's commands with `interp`.
pub fn init_module(interp: &mut CommandInterpreter) -> Result<(), CommandError> {
    interp.add_command("bta", "Print stack trace with assertion scopes.", bta)?;
    interp.add_command("thread", "List or select threads.", thread)?;
    Ok(())
}
