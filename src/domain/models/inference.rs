use serde::{Deserialize, Serialize};

/// A chat-template prompt ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPrompt(String);

impl FormattedPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sampling parameters forwarded to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    temperature: f64,
    max_tokens: u32,
}

impl GenerationOptions {
    pub fn new(temperature: f64, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceResult {
    text: String,
    tokens_used: Option<u64>,
}

impl InferenceResult {
    pub fn new(text: impl Into<String>, tokens_used: Option<u64>) -> Self {
        Self {
            text: text.into(),
            tokens_used,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens_used(&self) -> Option<u64> {
        self.tokens_used
    }

    pub fn into_parts(self) -> (String, Option<u64>) {
        (self.text, self.tokens_used)
    }
}

/// What a discovery call learned about the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendProbe {
    pub reachable: bool,
    pub model_available: bool,
}

impl BackendProbe {
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn reachable(model_available: bool) -> Self {
        Self {
            reachable: true,
            model_available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    status: String,
    #[serde(rename = "ollama_connected")]
    backend_reachable: bool,
    model_available: bool,
}

impl HealthStatus {
    pub fn from_probe(probe: BackendProbe) -> Self {
        Self {
            status: "healthy".to_string(),
            backend_reachable: probe.reachable,
            model_available: probe.model_available,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn backend_reachable(&self) -> bool {
        self.backend_reachable
    }

    pub fn model_available(&self) -> bool {
        self.model_available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn health_status_uses_dashboard_field_names() {
        let status = HealthStatus::from_probe(BackendProbe::reachable(false));
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"status": "healthy", "ollama_connected": true, "model_available": false})
        );
    }

    #[test]
    fn unreachable_probe_reports_nothing_available() {
        let probe = BackendProbe::unreachable();
        assert!(!probe.reachable);
        assert!(!probe.model_available);
    }
}
