use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::application::InferenceGateway;
use crate::domain::{
    BackendProbe, DomainError, FormattedPrompt, GenerationOptions, InferenceResult,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

const GENERATE_PATH: &str = "/api/generate";
const TAGS_PATH: &str = "/api/tags";

/// Where the Ollama backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    /// Bound on a whole generation call, connect through last body byte.
    pub request_timeout: Duration,
    pub discovery_timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
        }
    }
}

impl OllamaConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::config(format!("invalid Ollama URL {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::config(format!(
                "Ollama URL must use http or https, got {:?}",
                url.scheme()
            )));
        }
        if self.model.trim().is_empty() {
            return Err(DomainError::config("model name must not be empty"));
        }
        if self.request_timeout.is_zero() || self.discovery_timeout.is_zero() {
            return Err(DomainError::config("timeouts must be greater than zero"));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Serialize)]
struct SamplingOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    eval_count: Option<u64>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    #[serde(default)]
    name: String,
}

/// True when a name from `/api/tags` refers to the configured model.
///
/// Listed names carry a tag (`llama3:latest`); the part before `:` is compared.
/// A configured name that itself carries a tag must match exactly.
pub fn model_matches(listed: &str, configured: &str) -> bool {
    let base = listed.split(':').next().unwrap_or(listed);
    base == configured || listed == configured
}

/// [`InferenceGateway`] over Ollama's HTTP API.
///
/// Generation is a single non-streaming `POST /api/generate` bounded by
/// `request_timeout`; discovery is `GET /api/tags` bounded by
/// `discovery_timeout`. Nothing is retried.
pub struct OllamaGateway {
    client: reqwest::Client,
    probe_client: reqwest::Client,
    model: String,
    base_url: String,
    generate_url: String,
    tags_url: String,
}

impl OllamaGateway {
    pub fn new(config: &OllamaConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;
        let probe_client = reqwest::Client::builder()
            .connect_timeout(config.discovery_timeout)
            .timeout(config.discovery_timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            probe_client,
            model: config.model.clone(),
            generate_url: format!("{base_url}{GENERATE_PATH}"),
            tags_url: format!("{base_url}{TAGS_PATH}"),
            base_url,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            warn!("OllamaGateway: request to {} timed out", self.base_url);
            DomainError::BackendTimeout
        } else {
            warn!("OllamaGateway: cannot reach {}: {e}", self.base_url);
            DomainError::unreachable(&self.base_url, error_chain(&e))
        }
    }
}

/// `reqwest` hides the root cause (e.g. "Connection refused") in the source chain.
fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[async_trait]
impl InferenceGateway for OllamaGateway {
    async fn generate(
        &self,
        prompt: &FormattedPrompt,
        options: GenerationOptions,
    ) -> Result<InferenceResult, DomainError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: prompt.as_str(),
            stream: false,
            options: SamplingOptions {
                temperature: options.temperature(),
                num_predict: options.max_tokens(),
            },
        };

        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) if e.is_timeout() => {
                    warn!("OllamaGateway: timed out reading {status} reply body");
                    return Err(DomainError::BackendTimeout);
                }
                Err(e) => {
                    debug!("OllamaGateway: could not read {status} reply body: {e}");
                    String::new()
                }
            };
            warn!("OllamaGateway: API returned {status}: {body}");
            return Err(DomainError::backend_status(status.as_u16(), body));
        }

        let reply: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::BackendTimeout
            } else {
                DomainError::invalid_response(format!("failed to parse generate reply: {e}"))
            }
        })?;

        debug!(
            "OllamaGateway: generated {} chars (eval_count={:?})",
            reply.response.len(),
            reply.eval_count
        );
        Ok(InferenceResult::new(reply.response, reply.eval_count))
    }

    async fn discover(&self) -> BackendProbe {
        let response = match self.probe_client.get(&self.tags_url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("OllamaGateway: discovery failed: {e}");
                return BackendProbe::unreachable();
            }
        };

        if response.status() != StatusCode::OK {
            debug!("OllamaGateway: discovery returned {}", response.status());
            return BackendProbe::unreachable();
        }

        let tags: TagsResponse = match response.json().await {
            Ok(tags) => tags,
            Err(e) => {
                warn!("OllamaGateway: unreadable model listing: {e}");
                return BackendProbe::reachable(false);
            }
        };

        let available = tags
            .models
            .iter()
            .any(|m| model_matches(&m.name, &self.model));
        BackendProbe::reachable(available)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn backend_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_names_match_untagged_model() {
        assert!(model_matches("llama3:latest", "llama3"));
        assert!(model_matches("llama3", "llama3"));
        assert!(model_matches("llama3:8b", "llama3:8b"));
        assert!(!model_matches("llama3.1:latest", "llama3"));
        assert!(!model_matches("other-model", "llama3"));
        assert!(!model_matches("llama3:70b", "llama3:8b"));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(OllamaConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_config() {
        let bad_url = OllamaConfig {
            base_url: "not a url".to_string(),
            ..OllamaConfig::default()
        };
        assert!(matches!(bad_url.validate(), Err(DomainError::Config(_))));

        let bad_scheme = OllamaConfig {
            base_url: "ftp://localhost:11434".to_string(),
            ..OllamaConfig::default()
        };
        assert!(bad_scheme.validate().is_err());

        let no_model = OllamaConfig {
            model: "  ".to_string(),
            ..OllamaConfig::default()
        };
        assert!(no_model.validate().is_err());

        let no_timeout = OllamaConfig {
            request_timeout: Duration::ZERO,
            ..OllamaConfig::default()
        };
        assert!(no_timeout.validate().is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let gateway = OllamaGateway::new(&OllamaConfig {
            base_url: "http://localhost:11434/".to_string(),
            ..OllamaConfig::default()
        })
        .unwrap();
        assert_eq!(gateway.backend_url(), "http://localhost:11434");
        assert_eq!(gateway.generate_url, "http://localhost:11434/api/generate");
        assert_eq!(gateway.tags_url, "http://localhost:11434/api/tags");
    }
}
