use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use veritas::{
    app,
    cli::{handle_questions_command, Cli, CliCommand},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("Veritas {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::Questions) => {
            handle_questions_command()?;
            return Ok(());
        }
        None => {}
    }

    app::run_service().await
}
