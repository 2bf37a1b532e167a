use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::application::InferenceGateway;
use crate::domain::{
    BackendProbe, ControlToken, DomainError, FormattedPrompt, GenerationOptions, InferenceResult,
    Role,
};

const MOCK_MODEL: &str = "llama3";
const MOCK_URL: &str = "mock://ollama";

/// What a [`MockGateway`] answers to `generate`.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Reply with a fenced function call echoing the user's message.
    Echo,
    Text {
        text: String,
        tokens_used: Option<u64>,
    },
    Unreachable,
    Timeout,
    Status {
        status: u16,
        body: String,
    },
}

impl MockReply {
    pub fn text(text: impl Into<String>, tokens_used: Option<u64>) -> Self {
        Self::Text {
            text: text.into(),
            tokens_used,
        }
    }
}

/// In-process stand-in for the Ollama backend.
///
/// Used by `--mock-backend` for offline runs and by tests, which can inspect
/// the prompts it received.
pub struct MockGateway {
    model: String,
    reply: MockReply,
    probe: BackendProbe,
    prompts: Mutex<Vec<String>>,
    last_options: Mutex<Option<GenerationOptions>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_reply(MockReply::Echo)
    }

    pub fn with_reply(reply: MockReply) -> Self {
        Self {
            model: MOCK_MODEL.to_string(),
            reply,
            probe: BackendProbe::reachable(true),
            prompts: Mutex::new(Vec::new()),
            last_options: Mutex::new(None),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_probe(mut self, probe: BackendProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last_options(&self) -> Option<GenerationOptions> {
        *self.last_options.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn echo(prompt: &str) -> String {
        let payload = json!({
            "action": "echo",
            "parameters": { "message": user_message(prompt) },
            "reasoning": "Mock backend: no model was called.",
        });
        format!("```json\n{}\n```", payload)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// The content of the user turn in a formatted prompt.
fn user_message(prompt: &str) -> &str {
    let open = format!(
        "{}{}{}\n\n",
        ControlToken::StartHeaderId,
        Role::User,
        ControlToken::EndHeaderId
    );
    let Some(start) = prompt.find(&open).map(|i| i + open.len()) else {
        return "";
    };
    let rest = &prompt[start..];
    let end = rest.find(ControlToken::EotId.as_str()).unwrap_or(rest.len());
    &rest[..end]
}

#[async_trait]
impl InferenceGateway for MockGateway {
    async fn generate(
        &self,
        prompt: &FormattedPrompt,
        options: GenerationOptions,
    ) -> Result<InferenceResult, DomainError> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.as_str().to_string());
        *self.last_options.lock().unwrap_or_else(|e| e.into_inner()) = Some(options);

        debug!("MockGateway answering with {:?}", self.reply);

        match &self.reply {
            MockReply::Echo => {
                let text = Self::echo(prompt.as_str());
                let tokens = text.split_whitespace().count() as u64;
                Ok(InferenceResult::new(text, Some(tokens)))
            }
            MockReply::Text { text, tokens_used } => {
                Ok(InferenceResult::new(text.clone(), *tokens_used))
            }
            MockReply::Unreachable => {
                Err(DomainError::unreachable(MOCK_URL, "connection refused"))
            }
            MockReply::Timeout => Err(DomainError::BackendTimeout),
            MockReply::Status { status, body } => {
                Err(DomainError::backend_status(*status, body.clone()))
            }
        }
    }

    async fn discover(&self) -> BackendProbe {
        self.probe
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn backend_url(&self) -> &str {
        MOCK_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{extract_json, format_prompt};

    #[tokio::test]
    async fn echo_reply_is_an_extractable_function_call() {
        let gateway = MockGateway::new();
        let prompt = format_prompt("turn on the lights");

        let result = gateway
            .generate(&prompt, GenerationOptions::new(0.7, 16))
            .await
            .unwrap();

        let parsed = extract_json(result.text());
        let payload = parsed.parsed_json().unwrap();
        assert_eq!(payload["action"], "echo");
        assert_eq!(payload["parameters"]["message"], "turn on the lights");
    }

    #[test]
    fn user_message_handles_foreign_text() {
        assert_eq!(user_message("no template here"), "");
    }
}
