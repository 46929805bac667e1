//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Jekyll-flavoured static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Site source directory (default: current directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Site config file (relative to root)
    #[arg(short = 'C', long, default_value = "_config.yml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Minify the generated html
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Deletes the output directory if there is one and rebuilds the site
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build the site, then serve the output directory locally
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Build arguments of the selected command, if any.
    pub fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Some(Commands::Build { build_args } | Commands::Serve { build_args, .. }) => {
                Some(build_args)
            }
            None => None,
        }
    }

    #[allow(unused)]
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Some(Commands::Build { .. }))
    }

    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Some(Commands::Serve { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["jekyllish", "build"]).unwrap();
        assert!(cli.is_build());
        assert_eq!(cli.config, PathBuf::from("_config.yml"));
        assert_eq!(cli.build_args().unwrap().minify, None);
    }

    #[test]
    fn test_parse_serve_with_port() {
        let cli =
            Cli::try_parse_from(["jekyllish", "-r", "site", "serve", "-p", "8080", "-m"]).unwrap();
        assert!(cli.is_serve());
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.build_args().unwrap().minify, Some(true));
        match cli.command {
            Some(Commands::Serve { port, .. }) => assert_eq!(port, Some(8080)),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_without_command() {
        let cli = Cli::try_parse_from(["jekyllish"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.build_args().is_none());
    }

    #[test]
    fn test_unknown_command_is_error() {
        let err = Cli::try_parse_from(["jekyllish", "deploy"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }
}
