//! Entity-card transcription: HTML description → Markdown
//!
//! Two independent steps:
//! - `parse`  → reads the `entity-card` HTML fragment into `EntityCard`s
//! - `render` → writes Markdown from `EntityCard`s
//!
//! Card order is document order; the Markdown sections follow it exactly.

pub mod parse;
pub mod render;
pub mod types;

pub use parse::parse_entity_cards;
pub use render::render_markdown;
pub use types::{Attribute, EntityCard};

/// Transcription errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscribeError {
    /// A required sub-element is absent from a card
    #[error("entity card {card}: missing required element '.{element}'")]
    MissingElement { card: usize, element: &'static str },
}

/// Convert an entity-card HTML fragment to Markdown
pub fn to_markdown(html: &str) -> Result<String, TranscribeError> {
    let cards = parse_entity_cards(html)?;
    Ok(render_markdown(&cards))
}
