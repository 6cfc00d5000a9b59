//! OpenAI response parsing
//!
//! Public functions for parsing completion envelopes, error bodies, and the
//! embedded `{mermaid, html}` payload.

use serde_json::Value as JsonValue;

use crate::llm::adapters::AdapterError;
use crate::llm::types::GenerationResult;

/// Message used when a failed response carries no readable error message
pub const UNKNOWN_API_ERROR: &str = "Unknown error";

/// Extract `error.message` from a failed response body
///
/// Falls back to [`UNKNOWN_API_ERROR`] when the body is not JSON or the
/// field is absent.
pub fn parse_api_error(body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string())
}

/// Parse OpenAI chat completion JSON response into `choices[0].message`
pub fn parse_chat_completion(response: &str) -> Result<JsonValue, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)
        .map_err(|e| AdapterError::MalformedResponse(format!("body is not JSON: {}", e)))?;

    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .cloned()
        .ok_or_else(|| AdapterError::MalformedResponse("missing choices[0].message".to_string()))
}

/// Parse the message content into a `GenerationResult`
pub fn parse_generation_payload(message: &JsonValue) -> Result<GenerationResult, AdapterError> {
    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            AdapterError::MalformedPayload("message content is missing or not a string".to_string())
        })?;

    let payload: JsonValue = serde_json::from_str(content)
        .map_err(|e| AdapterError::MalformedPayload(format!("content is not JSON: {}", e)))?;

    let field = |name: &str| {
        payload
            .get(name)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AdapterError::MalformedPayload(format!("missing string field '{}'", name))
            })
    };

    Ok(GenerationResult {
        diagram_source: field("mermaid")?,
        description_html: field("html")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(content: &str) -> String {
        serde_json::json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
            .to_string()
    }

    #[test]
    fn test_parse_chat_completion_valid() {
        let message = parse_chat_completion(&envelope("hi")).unwrap();
        assert_eq!(message["content"], "hi");
    }

    #[test]
    fn test_parse_chat_completion_missing_choices() {
        let result = parse_chat_completion(r#"{"model":"gpt-4o"}"#);
        assert!(matches!(result, Err(AdapterError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_chat_completion_empty_choices() {
        let result = parse_chat_completion(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(AdapterError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_chat_completion_choice_without_message() {
        let result = parse_chat_completion(r#"{"choices":[{"index":0}]}"#);
        assert!(matches!(result, Err(AdapterError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_chat_completion_not_json() {
        let result = parse_chat_completion("<html>bad gateway</html>");
        assert!(matches!(result, Err(AdapterError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_payload_valid() {
        let message = serde_json::json!({
            "content": r#"{"mermaid":"erDiagram\n  A {}","html":"<div class=\"db-structure\"></div>"}"#
        });
        let result = parse_generation_payload(&message).unwrap();
        assert_eq!(result.diagram_source, "erDiagram\n  A {}");
        assert_eq!(result.description_html, "<div class=\"db-structure\"></div>");
    }

    #[test]
    fn test_parse_payload_content_not_json() {
        let message = serde_json::json!({"content": "Sure! Here is your diagram"});
        let result = parse_generation_payload(&message);
        assert!(matches!(result, Err(AdapterError::MalformedPayload(_))));
    }

    #[test]
    fn test_parse_payload_missing_html() {
        let message = serde_json::json!({"content": r#"{"mermaid":"erDiagram"}"#});
        let err = parse_generation_payload(&message).unwrap_err();
        assert_eq!(
            err,
            AdapterError::MalformedPayload("missing string field 'html'".to_string())
        );
    }

    #[test]
    fn test_parse_payload_null_content() {
        let message = serde_json::json!({"content": null});
        let result = parse_generation_payload(&message);
        assert!(matches!(result, Err(AdapterError::MalformedPayload(_))));
    }

    #[test]
    fn test_parse_api_error_message() {
        assert_eq!(
            parse_api_error(r#"{"error":{"message":"rate limited"}}"#),
            "rate limited"
        );
    }

    #[test]
    fn test_parse_api_error_fallback() {
        assert_eq!(parse_api_error("upstream exploded"), UNKNOWN_API_ERROR);
        assert_eq!(parse_api_error(r#"{"error":{}}"#), UNKNOWN_API_ERROR);
    }
}
