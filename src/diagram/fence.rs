//! Code-fence removal for model-produced diagram source
//!
//! Rule: an opening fence line (```` ``` ```` plus an optional language tag)
//! and a closing ```` ``` ```` are each removed when present. Either may be
//! missing. Whitespace outside the fences is trimmed. A word on the opening
//! fence line that is a Mermaid diagram keyword is content, not a tag.

const FENCE: &str = "```";

/// Mermaid diagram type keywords
const DIAGRAM_KEYWORDS: &[&str] = &[
    "erDiagram",
    "graph",
    "flowchart",
    "sequenceDiagram",
    "classDiagram",
    "stateDiagram",
    "stateDiagram-v2",
    "gantt",
    "pie",
    "journey",
    "gitGraph",
    "mindmap",
    "timeline",
    "quadrantChart",
    "requirementDiagram",
];

/// Strip optional Markdown code fences around diagram source
pub fn strip_fences(source: &str) -> String {
    let mut text = source.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = match rest.find('\n') {
            Some(end) if is_language_tag(&rest[..end]) => &rest[end + 1..],
            // Content starts on the fence line itself
            _ => rest,
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }

    text.trim_end().to_string()
}

fn is_language_tag(line: &str) -> bool {
    let word = line.trim();
    !DIAGRAM_KEYWORDS.contains(&word)
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "erDiagram\n    User ||--o{ Post : writes";

    #[test]
    fn test_strip_fence_with_language_tag() {
        let fenced = format!("```mermaid\n{}\n```", BODY);
        assert_eq!(strip_fences(&fenced), BODY);
    }

    #[test]
    fn test_strip_fence_without_language_tag() {
        let fenced = format!("```\n{}\n```", BODY);
        assert_eq!(strip_fences(&fenced), BODY);
    }

    #[test]
    fn test_strip_no_fences_is_identity() {
        assert_eq!(strip_fences(BODY), BODY);
    }

    #[test]
    fn test_strip_only_trailing_fence() {
        let fenced = format!("{}\n```", BODY);
        assert_eq!(strip_fences(&fenced), BODY);
    }

    #[test]
    fn test_strip_only_leading_fence() {
        let fenced = format!("```mermaid\n{}", BODY);
        assert_eq!(strip_fences(&fenced), BODY);
    }

    #[test]
    fn test_strip_surrounding_whitespace_and_crlf() {
        let fenced = format!("\n  ```mermaid \r\n{}\r\n```  \n", BODY);
        assert_eq!(strip_fences(&fenced), BODY);
    }

    #[test]
    fn test_strip_keeps_keyword_on_fence_line() {
        let fenced = "```erDiagram\n    A ||--o{ B : has\n```";
        assert_eq!(strip_fences(fenced), "erDiagram\n    A ||--o{ B : has");
    }

    #[test]
    fn test_strip_keeps_inner_comments() {
        let body = "erDiagram\n    %% audit tables\n    Log {\n        int id \"Primary key\"\n    }";
        assert_eq!(strip_fences(&format!("```mermaid\n{}\n```", body)), body);
    }
}
