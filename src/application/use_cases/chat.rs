use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::InferenceGateway;
use crate::domain::{
    extract_json, format_prompt, sanitize_input, ChatRequest, ChatResponse, DomainError,
    GenerationOptions,
};

/// Runs one chat turn: sanitize, format, generate, extract.
pub struct ChatUseCase {
    gateway: Arc<dyn InferenceGateway>,
}

impl ChatUseCase {
    pub fn new(gateway: Arc<dyn InferenceGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, request: ChatRequest) -> Result<ChatResponse, DomainError> {
        request.validate()?;

        let sanitized = sanitize_input(request.message());
        if sanitized.is_empty() {
            warn!(
                "Rejecting chat request: message of {} chars is empty after sanitization",
                request.message().chars().count()
            );
            return Err(DomainError::EmptyMessage);
        }

        let prompt = format_prompt(&sanitized);
        let options = GenerationOptions::new(request.temperature(), request.max_tokens());
        info!(
            "Sending prompt to {} (prompt_bytes={}, temperature={}, max_tokens={})",
            self.gateway.model_name(),
            prompt.as_str().len(),
            options.temperature(),
            options.max_tokens()
        );

        let start_time = Instant::now();
        let result = self.gateway.generate(&prompt, options).await?;
        info!(
            "Backend replied in {:.2}s (tokens_used={:?})",
            start_time.elapsed().as_secs_f64(),
            result.tokens_used()
        );

        let (text, tokens_used) = result.into_parts();
        let parsed_output = extract_json(&text);
        if let Some(error) = parsed_output.parse_error() {
            debug!("No JSON payload in model output: {}", error);
        }

        Ok(ChatResponse::new(
            text,
            parsed_output,
            self.gateway.model_name(),
            tokens_used,
        ))
    }
}
