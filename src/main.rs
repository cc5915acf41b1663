//! Feedsmith - build and serve RSS/Atom feeds from TOML definitions.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::Target};
use feedsmith::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match cli.command {
        Commands::Build {
            format,
            output,
            stdout,
        } => {
            let target = if stdout {
                Some(Target::Stdout)
            } else {
                output.map(Target::File)
            };
            cli::build::build_feed(&cli.config, format, target)
        }
        Commands::Serve { interface, port } => {
            cli::serve::serve_feed(&cli.config, interface, port)
        }
        Commands::Check => cli::check::check_feed(&cli.config).map(|_| ()),
    }
}
