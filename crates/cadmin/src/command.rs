use std::path::PathBuf;

use clap::{Parser, Subcommand};
use constellation_cli::Color;

use crate::{auth::LoginArgs, nodes::NodesCommands, render::Output};

pub const SERVER_ENV: &str = "CADMIN_SERVER";
pub const STATE_DIR_ENV: &str = "CADMIN_STATE_DIR";

#[derive(Parser, Clone)]
#[command(name = "Constellation Admin CLI", bin_name = "cadmin", version, about = "Constellation Admin CLI", long_about = None, disable_version_flag = true)]
pub struct Cli {
    // Optional so that running without a command prints the help
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short = 'o', long, global = true, value_enum, default_value_t = Output::JSON)]
    pub output: Output,

    #[arg(short = 'c', long, global = true, value_enum, default_value_t = Color::Auto)]
    pub color: Color,

    #[arg(
        short = 's',
        long,
        global = true,
        env = SERVER_ENV,
        help = "Server URL. Defaults to the server used at login."
    )]
    pub server: Option<String>,

    #[arg(
        long,
        global = true,
        env = STATE_DIR_ENV,
        help = "Directory holding credentials and the saved node order."
    )]
    pub state_dir: Option<PathBuf>,

    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Don't return anything to stdout."
    )]
    pub quiet: bool,

    // Lowercase v to match the rest of the flags
    #[arg(short = 'v', long, action = clap::builder::ArgAction::Version)]
    pub version: (),
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    #[command(long_about = "Log into an admin account.")]
    Login(LoginArgs),

    #[command(long_about = "Log out and forget the stored credentials.")]
    Logout,

    #[command(long_about = "Exchange the stored refresh token for a new session.")]
    Refresh,

    #[command(long_about = "Show which credentials are stored, without contacting the server.")]
    Status,

    #[command(long_about = "List and reorder the content tree.")]
    Nodes {
        #[command(subcommand)]
        command: NodesCommands,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "cadmin", "nodes", "move", "2", "0", "--server", "http://localhost", "-o", "yaml",
        ])
        .unwrap();

        assert_eq!(cli.server.as_deref(), Some("http://localhost"));
        assert_eq!(cli.output, Output::YAML);
        assert!(matches!(
            cli.command,
            Some(Commands::Nodes {
                command: NodesCommands::Move { from: 2, to: 0 }
            })
        ));
    }
}
