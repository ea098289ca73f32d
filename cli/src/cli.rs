//! All sub-commands:
//!
//! `acars parse <file> [--label L]` — replay one message body through the
//! registry and print every result as JSON.
//! `acars serve [-c config.hcl]` — run the ingest daemon (stdin bus) and the
//! HTTP enrichment API side by side until signalled to stop.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser, Subcommand};

#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Replay a single message body through the parser registry.
    Parse {
        /// Path to a file containing the raw message text; `-` reads stdin.
        file: PathBuf,
        /// ACARS label to dispatch under; defaults to a label-agnostic pass
        /// (global and catch-all parsers only).
        #[clap(short, long)]
        label: Option<String>,
    },
    /// Run the ingest daemon and HTTP API together.
    Serve {
        /// HCL configuration file; defaults to the OS-specific config path.
        #[clap(short, long)]
        config: Option<PathBuf>,
    },
}
