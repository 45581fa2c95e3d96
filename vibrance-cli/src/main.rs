//! Vibrance CLI - fetch a profile, events or merchandise from the command line

mod cli;
mod config;
mod error;
mod logging;
mod output;

use clap::Parser;
use cli::{Args, Command};
use config::Config;
use error::CliError;
use output::OutputFormatter;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init_logging(args.verbose, args.quiet);
    let verbose = args.verbose > 0;

    if let Err(e) = run(args).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e.user_message(verbose));
        std::process::exit(e.exit_code());
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let client = config.client()?;
    let formatter = OutputFormatter::new(config.format, config.quiet);
    let credentials = &config.credentials;

    tracing::info!(command = ?config.command, base_url = %client.base_url(), "fetching");
    let output = match config.command {
        Command::User => formatter.user(&client.get_user(credentials).await?)?,
        Command::Events => formatter.events(&client.get_events(credentials).await?)?,
        Command::Merchandise => {
            formatter.merchandise(&client.get_merchandise(credentials).await?)?
        }
    };

    println!("{}", output);
    Ok(())
}
