use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::{ChatRequest, ChatResponse, DomainError};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, DomainError> {
        self.container.chat_use_case().execute(request).await
    }

    pub async fn ask(
        &self,
        message: String,
        temperature: f64,
        max_tokens: u32,
        format: OutputFormat,
    ) -> Result<String> {
        let request = ChatRequest::new(message)
            .with_temperature(temperature)
            .with_max_tokens(max_tokens);
        let response = self.chat(request).await?;

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&response)?),
            OutputFormat::Text => self.format_response(&response),
        }
    }

    fn format_response(&self, response: &ChatResponse) -> Result<String> {
        let mut output = format!("Model: {}\n", response.model());
        if let Some(tokens) = response.tokens_used() {
            output.push_str(&format!("Tokens: {}\n", tokens));
        }
        output.push_str("\nResponse:\n");
        output.push_str(response.response().trim_end());
        output.push_str("\n\n");

        let parsed = response.parsed_output();
        match (parsed.parsed_json(), parsed.parse_error()) {
            (Some(json), _) => {
                output.push_str("Parsed JSON:\n");
                output.push_str(&serde_json::to_string_pretty(json)?);
            }
            (None, Some(error)) => output.push_str(&format!("Parse error: {}", error)),
            (None, None) => output.push_str("Parse error: (none reported)"),
        }

        Ok(output)
    }
}
