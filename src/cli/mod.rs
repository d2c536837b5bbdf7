use crate::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "veritas")]
#[command(about = "Simulated behavioral analysis for remote interviews", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print version information
    Version,
    /// Print the configured interview question list
    Questions,
}

pub fn handle_questions_command() -> Result<()> {
    let config = Config::load()?;
    for (index, question) in config.session.questions.iter().enumerate() {
        println!("{:>2}. {}", index + 1, question);
    }
    Ok(())
}
