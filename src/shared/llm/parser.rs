use lazy_static::lazy_static;
use regex::Regex;

use super::LlmResponse;

lazy_static! {
    /// Regex for trailing commas before } or ]
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();
}

/// Extract the JSON payload from raw model output.
///
/// Hosted models wrap JSON in markdown fences or surround it with prose
/// despite being asked for a bare object. Tries in order:
/// 1. ```json fenced block
/// 2. Generic ``` fenced block
/// 3. Plain JSON starting with {
/// 4. JSON embedded anywhere in the text (first { to last })
pub fn extract_json_string(text: &str) -> Result<String, String> {
    if text.contains("```json") {
        return text
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| "Failed to extract JSON from markdown code block".to_string());
    }

    if let Some(start) = text.find("```") {
        let block_start = start + 3;
        // Skip optional language identifier on the same line
        if let Some(newline_offset) = text[block_start..].find('\n') {
            let json_start = block_start + newline_offset + 1;
            if let Some(end_offset) = text[json_start..].find("```") {
                return Ok(text[json_start..json_start + end_offset].trim().to_string());
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    let start = text
        .find('{')
        .ok_or_else(|| "No JSON object found in response".to_string())?;
    let end = text
        .rfind('}')
        .ok_or_else(|| "Incomplete JSON object in response".to_string())?;

    if start < end {
        Ok(text[start..=end].to_string())
    } else {
        Err("Invalid JSON boundaries in response".to_string())
    }
}

/// Remove trailing commas before closing braces/brackets (common model mistake)
///
/// Example: `{"severity": "High",}` -> `{"severity": "High"}`
pub fn fix_trailing_commas(json_str: &str) -> String {
    TRAILING_COMMA_RE.replace_all(json_str, "$1").to_string()
}

/// Attempt structural repair via the llm_json crate.
///
/// llm_json can panic on pathological input, so the call is isolated behind
/// catch_unwind and a failed repair degrades to None.
fn repair_json(json_str: &str) -> Option<String> {
    let options = llm_json::RepairOptions::default();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        llm_json::repair_json(json_str, &options)
    }));

    match result {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("JSON repair failed: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("JSON repair panicked");
            None
        }
    }
}

/// Try to parse model output as the target type using multiple strategies.
///
/// Pipeline:
/// 1. Extract the JSON string (fenced/plain/embedded)
/// 2. Direct parse (fast path)
/// 3. Trailing-comma fix, then parse
/// 4. llm_json structural repair, then parse
fn try_parse<T>(text: &str) -> Result<T, String>
where
    T: LlmResponse,
{
    let json_str = extract_json_string(text)?;

    if let Ok(parsed) = serde_json::from_str::<T>(&json_str) {
        return Ok(parsed);
    }

    let fixed = fix_trailing_commas(&json_str);
    if let Ok(parsed) = serde_json::from_str::<T>(&fixed) {
        tracing::debug!("JSON parsed after trailing-comma fix");
        return Ok(parsed);
    }

    if let Some(repaired) = repair_json(&json_str) {
        if let Ok(parsed) = serde_json::from_str::<T>(&repaired) {
            tracing::debug!("JSON parsed after llm_json repair");
            return Ok(parsed);
        }
    }

    Err(format!(
        "Failed to parse JSON after all repair attempts. Original: {}",
        json_str.chars().take(200).collect::<String>()
    ))
}

/// Parse model response text with graceful fallback.
///
/// Main entry point for parsing structured model responses. If every
/// strategy fails, returns `T::default()` marked as a fallback carrying the
/// parse error; callers check `is_success()` and decide how to surface it.
pub fn parse_with_fallback<T>(text: &str) -> T
where
    T: LlmResponse,
{
    match try_parse::<T>(text) {
        Ok(parsed) => parsed,
        Err(error_msg) => {
            tracing::warn!("Model response parsing failed, using fallback: {}", error_msg);
            let mut fallback = T::default();
            fallback.mark_as_fallback(error_msg);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    fn default_true() -> bool {
        true
    }

    #[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
    struct TestAssessment {
        pub severity: String,
        pub description: String,
        pub score: Option<f64>,

        #[serde(default = "default_true")]
        #[schemars(skip)]
        pub parse_ok: bool,

        #[serde(skip)]
        #[schemars(skip)]
        pub parse_error: Option<String>,
    }

    impl LlmResponse for TestAssessment {
        fn mark_as_fallback(&mut self, error_message: String) {
            self.parse_ok = false;
            self.parse_error = Some(error_message);
        }

        fn is_success(&self) -> bool {
            self.parse_ok
        }

        fn error_message(&self) -> Option<&str> {
            self.parse_error.as_deref()
        }
    }

    // ==================== extract_json_string tests ====================

    #[test]
    fn test_extract_json_string_with_json_code_block() {
        let response = r#"Here is the classification:

```json
{
    "severity": "High",
    "description": "Deep pothole"
}
```

Let me know if you need anything else."#;

        let json = extract_json_string(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("\"severity\""));
    }

    #[test]
    fn test_extract_json_string_with_generic_code_block() {
        let response = "```\n{\"severity\": \"Low\", \"description\": \"Minor crack\"}\n```";

        let json = extract_json_string(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_extract_json_string_plain_json() {
        let response = r#"{"severity": "Medium", "description": "desc"}"#;
        assert_eq!(extract_json_string(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_string_embedded() {
        let response = "Sure! {\"severity\": \"Low\", \"description\": \"d\"} Hope that helps.";
        assert_eq!(
            extract_json_string(response).unwrap(),
            r#"{"severity": "Low", "description": "d"}"#
        );
    }

    #[test]
    fn test_extract_json_string_no_json() {
        assert!(extract_json_string("No JSON here at all!").is_err());
    }

    // ==================== fix_trailing_commas tests ====================

    #[test]
    fn test_fix_trailing_commas() {
        let input = r#"{"severity": "High", "score": 8,}"#;
        assert_eq!(fix_trailing_commas(input), r#"{"severity": "High", "score": 8}"#);

        let nested = r#"{"items": [1, 2, 3,],}"#;
        assert_eq!(fix_trailing_commas(nested), r#"{"items": [1, 2, 3]}"#);
    }

    // ==================== parse_with_fallback tests ====================

    #[test]
    fn test_parse_with_fallback_valid_json() {
        let input = r#"{"severity": "High", "description": "Deep hole", "score": 8.5}"#;

        let result: TestAssessment = parse_with_fallback(input);

        assert!(result.is_success());
        assert_eq!(result.severity, "High");
        assert_eq!(result.description, "Deep hole");
        assert_eq!(result.score, Some(8.5));
        assert!(result.error_message().is_none());
    }

    #[test]
    fn test_parse_with_fallback_markdown_json() {
        let input = "```json\n{\"severity\": \"Low\", \"description\": \"ok\"}\n```";

        let result: TestAssessment = parse_with_fallback(input);

        assert!(result.is_success());
        assert_eq!(result.severity, "Low");
    }

    #[test]
    fn test_parse_with_fallback_with_trailing_comma() {
        let input = r#"{"severity": "Medium", "description": "d",}"#;

        let result: TestAssessment = parse_with_fallback(input);

        assert!(result.is_success());
        assert_eq!(result.severity, "Medium");
    }

    #[test]
    fn test_parse_with_fallback_invalid_returns_fallback() {
        let result: TestAssessment = parse_with_fallback("this is not JSON at all");

        assert!(!result.is_success());
        assert!(result.error_message().is_some());
        assert!(result.severity.is_empty()); // Default value
    }

    #[test]
    fn test_parse_with_fallback_partial_json_does_not_panic() {
        let input = r#"{"severity": "High", "description": }"#;

        let result: TestAssessment = parse_with_fallback(input);

        // llm_json may or may not repair this; either way no panic
        assert!(result.is_success() || result.error_message().is_some());
    }

    // ==================== json_schema_string tests ====================

    #[test]
    fn test_json_schema_string_skips_internal_fields() {
        let schema = TestAssessment::json_schema_string();

        assert!(schema.contains("severity"));
        assert!(schema.contains("description"));
        assert!(schema.contains("score"));
        // Fallback bookkeeping must not leak into the prompt schema
        assert!(!schema.contains("parse_ok"));
        assert!(!schema.contains("parse_error"));
    }
}
