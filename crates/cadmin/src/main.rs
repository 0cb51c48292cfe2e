#![doc = include_str!("../README.md")]

use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;
use constellation_cli::install_color_eyre;
use tracing_subscriber::{
    EnvFilter, prelude::__tracing_subscriber_SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::{command::*, render::CommandResult, state::CliState};

mod auth;
mod command;
mod nodes;
mod render;
mod state;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // the log level hierarchy is determined by:
    //    - if RUST_LOG is detected at runtime
    //    - if RUST_LOG is provided at compile time
    //    - default to INFO
    let filter = EnvFilter::builder()
        .with_default_directive(
            option_env!("RUST_LOG")
                .unwrap_or("info")
                .parse()
                .expect("should provide valid log level at compile time."),
        )
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    install_color_eyre(cli.color)?;
    let render_config = render::RenderConfig::new(&cli);

    let Some(command) = cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()?;
        return Ok(());
    };

    let state = CliState::open(cli.state_dir, cli.server).await?;
    let result = process_commands(command, &state).await;

    render_config.render_result(result)
}

async fn process_commands(command: Commands, state: &CliState) -> CommandResult {
    match command {
        Commands::Login(args) => args.run(state).await,
        Commands::Logout => auth::logout(state).await,
        Commands::Refresh => auth::refresh(state).await,
        Commands::Status => auth::status(state).await,
        Commands::Nodes { command } => command.run(state).await,
    }
}
