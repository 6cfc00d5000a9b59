//! CLI argument parsing
//!
//! Grammar:
//! ```text
//! schemascribe [--home <dir>] [--config <file>] [COMMAND]
//!
//! COMMANDS:
//!   (none) | tui                       interactive terminal UI
//!   generate [-f FILE] [-o DIR] [--png] [--markdown] [DESCRIPTION]...
//!   markdown <HTML_FILE> [--copy]
//!   export-png [-w DIR] [-o DIR]
//!   key set <VALUE> | key clear | key status
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "schemascribe",
    version,
    about = "Turn a database description into an ER diagram and entity documentation"
)]
pub struct Args {
    /// Application home (config, saved key, logs)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Config file (default: <home>/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive terminal UI (default)
    Tui,

    /// Generate a diagram and description in one shot
    Generate(GenerateArgs),

    /// Convert an entity-card HTML file to Markdown
    Markdown {
        html_file: PathBuf,

        /// Also copy the Markdown to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Rasterize a rendered diagram to database-diagram.png
    ExportPng {
        /// Directory holding diagram.mmd / diagram.svg
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        workspace: PathBuf,

        /// Output directory (default: [export] output_dir)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Manage the saved API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, ClapArgs)]
pub struct GenerateArgs {
    /// Read the description from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "description")]
    pub file: Option<PathBuf>,

    /// Output directory (default: [export] output_dir)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Render diagram.svg and database-diagram.png with the Mermaid CLI
    #[arg(long)]
    pub png: bool,

    /// Also write description.md
    #[arg(long)]
    pub markdown: bool,

    /// Description text (joined with spaces)
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum KeyAction {
    /// Save the API key
    Set { value: String },
    /// Remove the saved API key
    Clear,
    /// Print whether a key is saved
    Status,
}

impl Args {
    /// Command to run; no command means the TUI
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tui)
    }
}

/// Parse arguments (first item is the program name)
pub fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_is_tui() {
        let args = parse_args(["schemascribe"]).unwrap();
        assert_eq!(args.command(), Command::Tui);
        assert_eq!(args.home, None);
    }

    #[test]
    fn test_global_home_after_subcommand() {
        let args = parse_args(["schemascribe", "key", "status", "--home", "/tmp/h"]).unwrap();
        assert_eq!(args.home, Some(PathBuf::from("/tmp/h")));
        assert_eq!(
            args.command(),
            Command::Key {
                action: KeyAction::Status
            }
        );
    }

    #[test]
    fn test_generate_collects_words() {
        let args = parse_args([
            "schemascribe",
            "generate",
            "--png",
            "-o",
            "out",
            "users",
            "and",
            "posts",
        ])
        .unwrap();
        let Command::Generate(generate) = args.command() else {
            panic!("expected generate");
        };
        assert!(generate.png);
        assert!(!generate.markdown);
        assert_eq!(generate.output, Some(PathBuf::from("out")));
        assert_eq!(generate.description, vec!["users", "and", "posts"]);
    }

    #[test]
    fn test_generate_file_conflicts_with_text() {
        assert!(parse_args(["schemascribe", "generate", "-f", "d.txt", "users"]).is_err());
    }

    #[test]
    fn test_export_png_defaults_workspace() {
        let args = parse_args(["schemascribe", "export-png"]).unwrap();
        assert_eq!(
            args.command(),
            Command::ExportPng {
                workspace: PathBuf::from("."),
                output: None
            }
        );
    }

    #[test]
    fn test_key_set_requires_value() {
        assert!(parse_args(["schemascribe", "key", "set"]).is_err());
        let args = parse_args(["schemascribe", "key", "set", "sk-x"]).unwrap();
        assert_eq!(
            args.command(),
            Command::Key {
                action: KeyAction::Set {
                    value: "sk-x".to_string()
                }
            }
        );
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(parse_args(["schemascribe", "plan"]).is_err());
    }
}
