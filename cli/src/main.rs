mod cli;
mod commands;

use clap::Parser;
use cli::{Opts, SubCommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;

    match opts.subcmd {
        SubCommand::Parse { file, label } => commands::run_parse(&file, label.as_deref()),
        SubCommand::Serve { config } => commands::run_serve(config.as_deref()).await,
    }
}
