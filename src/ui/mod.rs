//! Terminal UI: the interactive face of schemascribe
//!
//! - `state`    → `App`, the single owner of session state
//! - `input`    → key → `Action` mapping (pure)
//! - `handlers` → actions; slow work is spawned onto tokio
//! - `events`   → results coming back from spawned tasks
//! - `view`     → ratatui rendering

pub mod events;
pub mod handlers;
pub mod input;
pub mod state;
pub mod view;

// Re-exports
pub use events::{AppEvent, GenerationOutcome};
pub use input::{map_key, Action};
pub use state::{App, Focus, GenerationStatus, Notification, NotificationKind, Services};
pub use view::render;

/// UI result type
pub type Result<T> = std::result::Result<T, Error>;

/// UI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential error: {0}")]
    Credential(#[from] crate::credentials::CredentialError),
}
