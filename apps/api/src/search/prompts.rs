// Search LLM prompt templates.
// All prompts for the search module are defined here.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for search-intent extraction, built on the shared
/// JSON-only fragment.
pub fn prompt_parse_system() -> String {
    format!(
        "{JSON_ONLY_SYSTEM} \
        You extract search intent for a place-discovery app: the venue \
        category, extra specifications, and the location from the user's \
        prompt. Return exactly the keys: category, specifications, location. \
        Use an empty string or null for anything the prompt does not mention."
    )
}

pub const PROMPT_PARSE_PROMPT: &str = r#"Extract the information from: "{prompt}""#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_system_builds_on_shared_json_fragment() {
        let system = prompt_parse_system();
        assert!(system.contains(JSON_ONLY_SYSTEM));
        assert!(system.contains("category, specifications, location"));
    }
}
