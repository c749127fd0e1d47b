use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gator::app::Session;
use gator::cli::{commands, Cli};
use gator::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let commands = commands::default_commands();

    let Some(command) = Cli::try_parse()?.into_command() else {
        anyhow::bail!(
            "usage: gator <command> [args...]\ncommands: {}",
            commands.names().join(", ")
        );
    };

    let config = Config::load()?;
    let mut session = Session::new(config)?;

    commands.run(&mut session, &command).await?;

    Ok(())
}
