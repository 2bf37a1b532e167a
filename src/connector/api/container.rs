use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{ChatUseCase, HealthCheckUseCase, InferenceGateway};
use crate::connector::adapter::{MockGateway, OllamaConfig, OllamaGateway};

#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    pub ollama: OllamaConfig,
    /// Answer from an in-process mock instead of calling Ollama.
    pub mock_backend: bool,
}

/// Process-wide, read-only wiring shared by every request.
pub struct Container {
    gateway: Arc<dyn InferenceGateway>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let gateway: Arc<dyn InferenceGateway> = if config.mock_backend {
            debug!("Using mock inference backend");
            Arc::new(MockGateway::new().with_model(config.ollama.model.clone()))
        } else {
            debug!(
                "Using Ollama at {} with model {}",
                config.ollama.base_url, config.ollama.model
            );
            Arc::new(OllamaGateway::new(&config.ollama)?)
        };

        Ok(Self { gateway, config })
    }

    /// Build a container around an existing gateway, e.g. a test double.
    pub fn with_gateway(gateway: Arc<dyn InferenceGateway>, config: ContainerConfig) -> Self {
        Self { gateway, config }
    }

    pub fn chat_use_case(&self) -> ChatUseCase {
        ChatUseCase::new(self.gateway.clone())
    }

    pub fn health_use_case(&self) -> HealthCheckUseCase {
        HealthCheckUseCase::new(self.gateway.clone())
    }

    pub fn model(&self) -> &str {
        self.gateway.model_name()
    }

    pub fn backend_url(&self) -> &str {
        self.gateway.backend_url()
    }

    pub fn mock_backend(&self) -> bool {
        self.config.mock_backend
    }
}
