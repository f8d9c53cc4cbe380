mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use foodie_core::{AdminClient, SessionStore};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't talk to the backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let cfg = config::load_config()?;
            let (client_config, session) = config::resolve(&cli.global, &cfg)?;
            let client = AdminClient::new(&client_config, SessionStore::new(session))?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &client, &cli.global).await
        }
    }
}
