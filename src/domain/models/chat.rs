use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

pub const MAX_MESSAGE_CHARS: usize = 4096;
pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 2.0;
pub const MAX_TOKENS_LIMIT: u32 = 8192;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    message: String,
    #[serde(default = "default_temperature")]
    temperature: f64,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Checks the field bounds of the raw request.
    ///
    /// Emptiness after sanitization is checked separately by the chat use case.
    pub fn validate(&self) -> Result<(), DomainError> {
        let chars = self.message.chars().count();
        if chars == 0 {
            return Err(DomainError::invalid_input(
                "message must contain at least 1 character",
            ));
        }
        if chars > MAX_MESSAGE_CHARS {
            return Err(DomainError::invalid_input(format!(
                "message must contain at most {} characters (got {})",
                MAX_MESSAGE_CHARS, chars
            )));
        }
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(DomainError::invalid_input(format!(
                "temperature must be between {} and {} (got {})",
                MIN_TEMPERATURE, MAX_TEMPERATURE, self.temperature
            )));
        }
        if !(1..=MAX_TOKENS_LIMIT).contains(&self.max_tokens) {
            return Err(DomainError::invalid_input(format!(
                "max_tokens must be between 1 and {} (got {})",
                MAX_TOKENS_LIMIT, self.max_tokens
            )));
        }
        Ok(())
    }
}

/// Outcome of looking for a JSON payload in generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedOutput {
    raw_text: String,
    parsed_json: Option<Value>,
    parse_error: Option<String>,
}

impl ParsedOutput {
    pub fn parsed(raw_text: impl Into<String>, value: Value) -> Self {
        Self {
            raw_text: raw_text.into(),
            parsed_json: Some(value),
            parse_error: None,
        }
    }

    pub fn failed(raw_text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            parsed_json: None,
            parse_error: Some(error.into()),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn parsed_json(&self) -> Option<&Value> {
        self.parsed_json.as_ref()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    success: bool,
    response: String,
    parsed_output: ParsedOutput,
    model: String,
    tokens_used: Option<u64>,
}

impl ChatResponse {
    pub fn new(
        response: impl Into<String>,
        parsed_output: ParsedOutput,
        model: impl Into<String>,
        tokens_used: Option<u64>,
    ) -> Self {
        Self {
            success: true,
            response: response.into(),
            parsed_output,
            model: model.into(),
            tokens_used,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn parsed_output(&self) -> &ParsedOutput {
        &self.parsed_output
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tokens_used(&self) -> Option<u64> {
        self.tokens_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_apply_when_fields_are_missing() {
        let request: ChatRequest = serde_json::from_value(json!({"message": "hi"})).unwrap();
        assert_eq!(request.temperature(), 0.7);
        assert_eq!(request.max_tokens(), 2048);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_message() {
        let err = ChatRequest::new("").validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let message = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(ChatRequest::new(message).validate().is_ok());

        let too_long = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(ChatRequest::new(too_long).validate().is_err());
    }

    #[test]
    fn validate_checks_sampling_bounds() {
        assert!(ChatRequest::new("x").with_temperature(2.0).validate().is_ok());
        assert!(ChatRequest::new("x").with_temperature(2.1).validate().is_err());
        assert!(ChatRequest::new("x").with_temperature(-0.1).validate().is_err());
        assert!(ChatRequest::new("x").with_temperature(f64::NAN).validate().is_err());
        assert!(ChatRequest::new("x").with_max_tokens(0).validate().is_err());
        assert!(ChatRequest::new("x").with_max_tokens(8192).validate().is_ok());
        assert!(ChatRequest::new("x").with_max_tokens(8193).validate().is_err());
    }

    #[test]
    fn parsed_output_serializes_absent_fields_as_null() {
        let output = ParsedOutput::failed("hello", "Could not parse JSON");
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({
                "raw_text": "hello",
                "parsed_json": null,
                "parse_error": "Could not parse JSON"
            })
        );
    }
}
