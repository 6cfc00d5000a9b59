//! System and user prompts for diagram generation
//!
//! The system prompt fixes the output contract: one JSON object with a
//! Mermaid `erDiagram` under `mermaid` and an entity-card HTML fragment under
//! `html`. The HTML class names are the ones `transcribe::parse` reads.

use crate::llm::types::{ChatMessage, ChatRequest, ModelSettings, ResponseFormat, Role};

/// Get the immutable system prompt
pub fn system_prompt() -> String {
    r#"You generate database diagrams and entity documentation from plain-language descriptions.

Respond with ONE JSON object and nothing else. It has exactly two string properties:
- "mermaid": a Mermaid ER diagram
- "html": a mobile-friendly HTML description of every entity

MERMAID RULES:
1. Start with the keyword erDiagram.
2. Declare every entity as a block listing all of its attributes.
3. Write each attribute as: type name "description"
4. Connect entities with relationship lines using cardinality tokens such as ||--o{, ||--|{, }o--o{, ||--||
   followed by ": label".

Mermaid example:
erDiagram
    User {
        int id "Primary key"
        string email "Login address"
        string role "Access role"
    }
    Post {
        int id "Primary key"
        string title "Headline"
        datetime created_at "Creation time"
    }
    User ||--o{ Post : writes

HTML RULES:
Use exactly this structure and these class names, one entity-card per entity:
<div class="db-structure">
    <div class="entity-card" data-entity="[EntityName]">
        <h3 class="entity-title">[EntityName]</h3>
        <div class="entity-description">[What the entity represents]</div>
        <div class="attributes">
            <h4>Attributes</h4>
            <ul class="attribute-list">
                <li>
                    <span class="attr-name">[name]</span> -
                    <span class="attr-type">[type]</span>
                    <div class="attr-description">[description]</div>
                </li>
            </ul>
        </div>
        <div class="relationships">
            <h4>Relationships</h4>
            <ul class="relationship-list">
                <li>[relationship sentence]</li>
            </ul>
        </div>
    </div>
</div>"#
        .to_string()
}

/// Build the user turn around the description (embedded verbatim)
pub fn user_prompt(description: &str) -> String {
    format!(
        "Analyze the database description below and return a JSON object with two properties:\n\
1. 'mermaid': Mermaid ER diagram source with\n\
   - every entity and its attributes\n\
   - type, name and a quoted description for each attribute\n\
   - relationship lines using cardinality notation\n\
2. 'html': HTML describing each entity, its purpose, attributes and relationships\n\
\n\
Description: {}",
        description
    )
}

/// Build the chat completion request for one description
///
/// Pure: no I/O, no validation. Callers reject an empty description first.
pub fn build_generation_request(description: &str, settings: &ModelSettings) -> ChatRequest {
    ChatRequest {
        model: settings.model.clone(),
        response_format: ResponseFormat::json_object(),
        max_tokens: settings.max_tokens,
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: system_prompt(),
            },
            ChatMessage {
                role: Role::User,
                content: user_prompt(description),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_names_transcribed_classes() {
        let prompt = system_prompt();
        for class in [
            "entity-card",
            "entity-title",
            "entity-description",
            "attribute-list",
            "attr-name",
            "attr-type",
            "attr-description",
            "relationship-list",
        ] {
            assert!(prompt.contains(class), "missing class {}", class);
        }
        assert!(prompt.contains("erDiagram"));
    }

    #[test]
    fn test_build_request_shape() {
        let request = build_generation_request("a blog with users", &ModelSettings::default());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_build_request_embeds_description_verbatim() {
        let description = "Shops sell \"items\";\n items have {prices}";
        let request = build_generation_request(description, &ModelSettings::default());
        assert!(request.messages[1]
            .content
            .ends_with(&format!("Description: {}", description)));
    }

    #[test]
    fn test_build_request_is_deterministic() {
        let settings = ModelSettings {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
        };
        let a = build_generation_request("x", &settings);
        let b = build_generation_request("x", &settings);
        assert_eq!(a, b);
        assert_eq!(a.model, "gpt-4o-mini");
        assert_eq!(a.max_tokens, 1024);
    }
}
