//! Export adapters: PNG download and Markdown clipboard copy

pub mod clipboard;
pub mod raster;

pub use clipboard::{copy_markdown, Clipboard, ClipboardBackend, MemoryClipboard, Osc52Clipboard};
pub use raster::{export_png, PNG_FILE_NAME};

use crate::diagram::RenderError;
use crate::transcribe::TranscribeError;

/// Export errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to rasterize diagram: {0}")]
    Raster(#[from] RenderError),

    #[error("Failed to prepare output directory {path}: {message}")]
    OutputDir { path: String, message: String },

    #[error("Failed to copy Markdown to clipboard: {0}")]
    Clipboard(String),

    #[error("Failed to convert description to Markdown: {0}")]
    Transcribe(#[from] TranscribeError),
}
