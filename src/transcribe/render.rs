//! Markdown writer for entity cards

use std::fmt::Write as _;

use crate::transcribe::types::EntityCard;

const TABLE_HEADER: &str = "| Name | Type | Description |\n";
const TABLE_SEPARATOR: &str = "|------|------|-------------|\n";

/// Render cards as Markdown, one section per card, in the given order
///
/// Cell text is written as-is: a `|` or newline inside an attribute breaks
/// the table.
pub fn render_markdown(cards: &[EntityCard]) -> String {
    let mut out = String::new();
    for card in cards {
        render_card(&mut out, card);
    }
    out
}

fn render_card(out: &mut String, card: &EntityCard) {
    let _ = write!(out, "## {}\n\n", card.title);

    if let Some(description) = card.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(out, "{}\n\n", description);
    }

    out.push_str("### Attributes\n\n");
    out.push_str(TABLE_HEADER);
    out.push_str(TABLE_SEPARATOR);
    for attr in &card.attributes {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            attr.name,
            attr.type_name,
            attr.description.as_deref().unwrap_or("")
        );
    }
    out.push('\n');

    if let Some(relationships) = &card.relationships {
        out.push_str("### Relationships\n\n");
        for rel in relationships {
            let _ = writeln!(out, "- {}", rel);
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
}
