//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use feedsmith::{FeedFormat, config::DEFAULT_DEFINITION};
use std::{net::IpAddr, path::PathBuf};

/// Feedsmith RSS/Atom feed builder CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Feed definition file path
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = DEFAULT_DEFINITION,
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render the feed to a file
    #[command(visible_alias = "b")]
    Build {
        /// Output format, overrides `[build].format`
        #[arg(short, long, value_parser = parse_format)]
        format: Option<FeedFormat>,

        /// Output path, overrides `[build].output`
        #[arg(short, long, value_hint = clap::ValueHint::FilePath, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the feed to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },

    /// Serve the feed over HTTP, reloading the definition per request
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long, default_value = "127.0.0.1")]
        interface: IpAddr,

        /// Port number to listen on
        #[arg(short, long, default_value_t = 5277)]
        port: u16,
    },

    /// Validate the feed definition without writing anything
    #[command(visible_alias = "c")]
    Check,
}

fn parse_format(s: &str) -> Result<FeedFormat, String> {
    s.parse()
}
