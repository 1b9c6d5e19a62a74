//! Utilities for extracting structured data from LLM responses.
//!
//! LLM responses often wrap JSON in markdown code blocks or surround it with
//! explanatory text.

use kahovitz_error::{JsonError, KahovitzResult};

/// Extract a JSON object from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` (or an untagged fence)
/// 2. The first balanced `{ ... }`
///
/// # Errors
///
/// Returns an error if no JSON object is found in the response.
///
/// # Examples
///
/// ```
/// use kahovitz_story::extract_json;
///
/// let response = "Here is the plan:\n```json\n{\"refinedPrompt\": \"A heist\"}\n```\n";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> KahovitzResult<String> {
    if let Some(json) = extract_from_code_block(response, "json") {
        if json.starts_with('{') {
            return Ok(json);
        }
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::debug!(
        response_length = response.len(),
        "No JSON object found in LLM response"
    );

    Err(JsonError::new(format!(
        "No JSON object found in response (length: {})",
        response.len()
    ))
    .into())
}

/// Extract content from markdown code blocks.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        let content = match response[content_start..].find("```") {
            Some(end) => &response[content_start..content_start + end],
            // Truncated response: take everything after the fence
            None => &response[content_start..],
        };
        return Some(content.trim().to_string());
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    let content = match response[skip_to..].find("```") {
        Some(end) => &response[skip_to..skip_to + end],
        None => &response[skip_to..],
    };
    Some(content.trim().to_string())
}

/// Extract content between balanced delimiters, ignoring delimiters in strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON into a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
///
/// # Examples
///
/// ```
/// use kahovitz_story::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Idea {
///     title: String,
/// }
///
/// let idea: Idea = parse_json(r#"{"title": "Moonrise"}"#).unwrap();
/// assert_eq!(idea.title, "Moonrise");
/// ```
pub fn parse_json<T>(json_str: &str) -> KahovitzResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::debug!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the plan you requested:

```json
{
  "refinedPrompt": "A lighthouse keeper finds a map",
  "phasePlan": {"setup": "storm"}
}
```

Enjoy!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"refinedPrompt\""));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"Sure! {"refinedPrompt": "x", "phasePlan": {"climax": "y"}} trailing"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with("}}"));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let response = r#"{"refinedPrompt": "a {curly} tale", "n": 1}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let response = r#"prefix {"text": "She said \"hi\" {"} suffix"#;
        let json = extract_json(response).unwrap();
        assert!(json.ends_with("\"}"));
    }

    #[test]
    fn test_no_json_found() {
        assert!(extract_json("This is just plain text").is_err());
    }

    #[test]
    fn test_unterminated_object_is_not_json() {
        assert!(extract_json("{\"refinedPrompt\": \"cut off").is_err());
    }

    #[test]
    fn test_parse_json_error_mentions_preview() {
        let err = parse_json::<serde_json::Value>("{not json").unwrap_err();
        assert!(err.to_string().contains("{not json"));
    }
}
