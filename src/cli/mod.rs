pub mod commands;
pub mod registry;

use clap::Parser;

pub use registry::{Command, CommandHandler, Commands};

#[derive(Parser, Debug)]
#[command(name = "gator")]
#[command(about = "A command-line RSS feed aggregator", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Command to run: login, register, reset, users, agg, addfeed, feeds
    #[arg(allow_hyphen_values = true)]
    pub command: Option<String>,

    /// Positional arguments for the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// The command to dispatch, if one was given.
    pub fn into_command(self) -> Option<Command> {
        let name = self.command?;
        Some(Command::new(name, self.args))
    }
}
