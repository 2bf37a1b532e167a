use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Message is empty after sanitization")]
    EmptyMessage,

    #[error("Cannot connect to Ollama at {url}: {reason}")]
    BackendUnreachable { url: String, reason: String },

    #[error("Ollama request timed out")]
    BackendTimeout,

    #[error("Ollama API error: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("Invalid response from Ollama: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unreachable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BackendUnreachable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn backend_status(status: u16, body: impl Into<String>) -> Self {
        Self::BackendStatus {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_message_names_backend_address() {
        let err = DomainError::unreachable("http://localhost:11434", "connection refused");
        assert_eq!(
            err.to_string(),
            "Cannot connect to Ollama at http://localhost:11434: connection refused"
        );
    }

    #[test]
    fn backend_status_message_carries_body() {
        let err = DomainError::backend_status(404, "model 'llama3' not found");
        assert_eq!(err.to_string(), "Ollama API error: model 'llama3' not found");
    }
}
