// CLI module for studyforge
// Author: kelexine (https://github.com/kelexine)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// studyforge - explanation cache and content segmentation service
#[derive(Parser, Debug)]
#[command(name = "studyforge", version, about, long_about = None)]
pub struct Args {
    /// Config file to load instead of ~/.studyforge/config.toml
    #[arg(long, short, env = "STUDYFORGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Split a text file into sections and chunks and print them
    Segment {
        /// File to read
        path: PathBuf,

        /// Override the configured chunk budget
        #[arg(long)]
        max_tokens: Option<usize>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let args = Args::try_parse_from(["studyforge"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_config_flag_is_global() {
        let args =
            Args::try_parse_from(["studyforge", "segment", "notes.md", "--config", "alt.toml"])
                .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_parses_segment() {
        let args =
            Args::try_parse_from(["studyforge", "segment", "notes.md", "--max-tokens", "200", "--json"])
                .unwrap();
        assert_eq!(
            args.command,
            Some(Command::Segment {
                path: PathBuf::from("notes.md"),
                max_tokens: Some(200),
                json: true,
            })
        );
    }
}
