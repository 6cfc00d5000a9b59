//! CLI module
//!
//! Provides:
//! - Argument parsing (clap)
//! - Home directory resolution (flag → env → platform config dir → cwd)
//! - Dispatch of the non-interactive commands

pub mod args;
pub mod dispatch;
pub mod home;

// Re-exports
pub use args::{parse_args, Args, Command, GenerateArgs, KeyAction};
pub use dispatch::{exit_code, load_context, run_command, Context};
pub use home::resolve_home;

use crate::config::ConfigError;
use crate::credentials::CredentialError;
use crate::diagram::RenderError;
use crate::export::ExportError;
use crate::llm::AdapterError;
use crate::transcribe::TranscribeError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected before any external call
    #[error("{0}")]
    Validation(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Failed to generate diagram: {0}")]
    Completion(#[from] AdapterError),

    #[error("Failed to render diagram: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to convert description to Markdown: {0}")]
    Transcribe(#[from] TranscribeError),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_VALIDATION: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
