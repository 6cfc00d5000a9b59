//! Markdown copy to the system clipboard
//!
//! The terminal backend uses the OSC 52 escape sequence, which most modern
//! terminal emulators forward to the system clipboard.

use std::io;
use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use crossterm::{execute, style::Print};
use tracing::info;

use crate::export::ExportError;
use crate::transcribe::to_markdown;

/// Clipboard sink
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ExportError>;
}

/// OSC 52 clipboard on the controlling terminal (stdout)
#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    /// Escape sequence that places `text` on the clipboard
    pub fn sequence(text: &str) -> String {
        let encoded = STANDARD.encode(text.as_bytes());
        format!("\x1b]52;c;{encoded}\x1b\\")
    }
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ExportError> {
        let mut stdout = io::stdout();
        execute!(stdout, Print(Self::sequence(text)))
            .map_err(|e| ExportError::Clipboard(e.to_string()))
    }
}

/// In-memory clipboard for tests
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard that rejects every write
    pub fn rejecting() -> Self {
        Self {
            contents: Mutex::new(None),
            reject: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ExportError> {
        if self.reject {
            return Err(ExportError::Clipboard("clipboard write rejected".to_string()));
        }
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| ExportError::Clipboard(e.to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

/// Concrete clipboard enum
#[derive(Debug)]
pub enum ClipboardBackend {
    Osc52(Osc52Clipboard),
    Memory(MemoryClipboard),
}

impl Clipboard for ClipboardBackend {
    fn write_text(&self, text: &str) -> Result<(), ExportError> {
        match self {
            ClipboardBackend::Osc52(c) => c.write_text(text),
            ClipboardBackend::Memory(c) => c.write_text(text),
        }
    }
}

impl Default for ClipboardBackend {
    fn default() -> Self {
        ClipboardBackend::Osc52(Osc52Clipboard)
    }
}

/// Transcribe the description HTML and copy the Markdown
///
/// Returns the Markdown that was copied.
pub fn copy_markdown<C>(clipboard: &C, description_html: &str) -> Result<String, ExportError>
where
    C: Clipboard + ?Sized,
{
    let markdown = to_markdown(description_html)?;
    clipboard.write_text(&markdown)?;
    info!(bytes = markdown.len(), "markdown copied to clipboard");
    Ok(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = r#"<div class="entity-card"><h3 class="entity-title">Tag</h3></div>"#;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(Osc52Clipboard::sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
    }

    #[test]
    fn test_copy_markdown_writes_clipboard() {
        let clipboard = MemoryClipboard::new();
        let markdown = copy_markdown(&clipboard, CARD).unwrap();
        assert!(markdown.starts_with("## Tag\n\n"));
        assert_eq!(clipboard.contents(), Some(markdown));
    }

    #[test]
    fn test_copy_markdown_rejected_write() {
        let clipboard = MemoryClipboard::rejecting();
        let err = copy_markdown(&clipboard, CARD).unwrap_err();
        assert!(matches!(err, ExportError::Clipboard(_)));
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn test_copy_markdown_transcribe_failure() {
        let clipboard = MemoryClipboard::new();
        let err = copy_markdown(&clipboard, r#"<div class="entity-card"></div>"#).unwrap_err();
        assert!(matches!(err, ExportError::Transcribe(_)));
        assert_eq!(clipboard.contents(), None);
    }
}
