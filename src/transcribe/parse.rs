//! Entity-card HTML reader
//!
//! Expected fragment shape (class names are the contract with the prompt):
//! ```text
//! .entity-card
//!   .entity-title            required
//!   .entity-description      optional
//!   .attribute-list li       zero or more
//!     .attr-name             required
//!     .attr-type             required
//!     .attr-description      optional
//!   .relationship-list li    optional list, zero or more items
//! ```
//!
//! All text is taken verbatim from the element's text content.

use scraper::{ElementRef, Html};

use crate::transcribe::types::{Attribute, EntityCard};
use crate::transcribe::TranscribeError;

const CARD: &str = "entity-card";
const TITLE: &str = "entity-title";
const DESCRIPTION: &str = "entity-description";
const ATTRIBUTE_LIST: &str = "attribute-list";
const ATTR_NAME: &str = "attr-name";
const ATTR_TYPE: &str = "attr-type";
const ATTR_DESCRIPTION: &str = "attr-description";
const RELATIONSHIP_LIST: &str = "relationship-list";

/// Parse every entity card in the fragment, in document order
pub fn parse_entity_cards(html: &str) -> Result<Vec<EntityCard>, TranscribeError> {
    let document = Html::parse_fragment(html);
    let root = document.root_element();

    descendants_with_class(root, CARD)
        .enumerate()
        .map(|(index, card)| parse_card(index, card))
        .collect()
}

fn parse_card(index: usize, card: ElementRef<'_>) -> Result<EntityCard, TranscribeError> {
    let title = first_with_class(card, TITLE)
        .map(text_content)
        .ok_or(TranscribeError::MissingElement {
            card: index,
            element: TITLE,
        })?;

    let description = first_with_class(card, DESCRIPTION).map(text_content);

    let attributes = attribute_items(card)
        .map(|item| parse_attribute(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let relationships = first_with_class(card, RELATIONSHIP_LIST)
        .filter(|list| child_element_count(*list) > 0)
        .map(|list| {
            descendants(list)
                .filter(|el| el.value().name() == "li")
                .map(text_content)
                .collect()
        });

    Ok(EntityCard {
        title,
        description,
        attributes,
        relationships,
    })
}

fn parse_attribute(card: usize, item: ElementRef<'_>) -> Result<Attribute, TranscribeError> {
    let name = first_with_class(item, ATTR_NAME)
        .map(text_content)
        .ok_or(TranscribeError::MissingElement {
            card,
            element: ATTR_NAME,
        })?;
    let type_name = first_with_class(item, ATTR_TYPE)
        .map(text_content)
        .ok_or(TranscribeError::MissingElement {
            card,
            element: ATTR_TYPE,
        })?;
    let description = first_with_class(item, ATTR_DESCRIPTION).map(text_content);

    Ok(Attribute {
        name,
        type_name,
        description,
    })
}

/// `li` elements of the card that sit inside an attribute list
fn attribute_items<'a>(card: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    descendants(card).filter(move |el| {
        el.value().name() == "li"
            && el
                .ancestors()
                .take_while(|node| node.id() != card.id())
                .filter_map(ElementRef::wrap)
                .any(|ancestor| has_class(ancestor, ATTRIBUTE_LIST))
    })
}

/// Element descendants in document order, excluding `scope` itself
fn descendants<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn descendants_with_class<'a>(
    scope: ElementRef<'a>,
    class: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    descendants(scope).filter(move |el| has_class(*el, class))
}

fn first_with_class<'a>(scope: ElementRef<'a>, class: &'static str) -> Option<ElementRef<'a>> {
    descendants_with_class(scope, class).next()
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn child_element_count(el: ElementRef<'_>) -> usize {
    el.children().filter_map(ElementRef::wrap).count()
}

fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cards_in_document_order() {
        let html = r#"
<div class="entity-card"><h3 class="entity-title">B</h3></div>
<div class="entity-card"><h3 class="entity-title">A</h3></div>
<div class="entity-card"><h3 class="entity-title">C</h3></div>"#;

        let titles: Vec<_> = parse_entity_cards(html)
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_parse_text_is_verbatim() {
        let html = r#"<div class="entity-card"><h3 class="entity-title"> Order <em>Line</em> </h3></div>"#;
        let cards = parse_entity_cards(html).unwrap();
        assert_eq!(cards[0].title, " Order Line ");
    }

    #[test]
    fn test_parse_attribute_without_description() {
        let html = r#"
<div class="entity-card">
  <h3 class="entity-title">Tag</h3>
  <ul class="attribute-list">
    <li><span class="attr-name">label</span> - <span class="attr-type">string</span></li>
  </ul>
</div>"#;
        let cards = parse_entity_cards(html).unwrap();
        assert_eq!(cards[0].attributes, vec![Attribute::new("label", "string")]);
    }

    #[test]
    fn test_parse_empty_relationship_list_yields_no_relationships() {
        let html = r#"
<div class="entity-card">
  <h3 class="entity-title">Tag</h3>
  <ul class="relationship-list"></ul>
</div>"#;
        let cards = parse_entity_cards(html).unwrap();
        assert_eq!(cards[0].relationships, None);
    }

    #[test]
    fn test_parse_relationship_list_with_non_item_children() {
        let html = r#"
<div class="entity-card">
  <h3 class="entity-title">A</h3>
  <ul class="relationship-list"><p>has many B</p></ul>
</div>"#;
        let cards = parse_entity_cards(html).unwrap();
        assert_eq!(cards[0].relationships, Some(Vec::new()));
    }

    #[test]
    fn test_parse_list_items_outside_attribute_list_are_ignored() {
        let html = r#"
<div class="entity-card">
  <h3 class="entity-title">Tag</h3>
  <ul class="notes"><li>not an attribute</li></ul>
  <ul class="attribute-list">
    <li><span class="attr-name">id</span><span class="attr-type">int</span></li>
  </ul>
</div>"#;
        let cards = parse_entity_cards(html).unwrap();
        assert_eq!(cards[0].attributes.len(), 1);
        assert_eq!(cards[0].attributes[0].name, "id");
    }

    #[test]
    fn test_parse_attribute_missing_type_is_error() {
        let html = r#"
<div class="entity-card">
  <h3 class="entity-title">One</h3>
</div>
<div class="entity-card">
  <h3 class="entity-title">Two</h3>
  <ul class="attribute-list"><li><span class="attr-name">id</span></li></ul>
</div>"#;
        assert_eq!(
            parse_entity_cards(html).unwrap_err(),
            TranscribeError::MissingElement {
                card: 1,
                element: "attr-type"
            }
        );
    }

    #[test]
    fn test_parse_description_element_present_but_empty() {
        let html = r#"<div class="entity-card"><h3 class="entity-title">X</h3><div class="entity-description"></div></div>"#;
        let cards = parse_entity_cards(html).unwrap();
        assert_eq!(cards[0].description.as_deref(), Some(""));
    }
}
