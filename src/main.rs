//! jekyllish - a minimal Jekyll-flavoured static site generator.

mod build;
mod cli;
mod config;
mod logger;
mod page;
mod serve;
mod template;
mod utils;

use anyhow::Result;
use build::Site;
use clap::{CommandFactory, Parser, error::ErrorKind};
use cli::Cli;
use config::BuilderConfig;
use serve::serve_site;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => return print_usage(),
        Err(err) => err.exit(),
    };

    if cli.command.is_none() {
        return print_usage();
    }

    let site = Site::new(BuilderConfig::from_cli(&cli));
    site.build()?;

    if cli.is_serve() {
        serve_site(site.config())?;
    }
    Ok(())
}

/// Print help and exit successfully.
fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    Ok(())
}
