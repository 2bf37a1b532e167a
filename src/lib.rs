pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{ChatUseCase, HealthCheckUseCase, InferenceGateway};

pub use cli::{Commands, OutputFormat};

pub use connector::{
    build_router, serve, ApiError, Container, ContainerConfig, ErrorBody, MockGateway, MockReply,
    OllamaConfig, OllamaGateway, Router,
};

pub use domain::{
    extract_json, format_prompt, sanitize_input, BackendProbe, ChatRequest, ChatResponse,
    ControlToken, DomainError, ExtractionStrategy, FormattedPrompt, GenerationOptions,
    HealthStatus, InferenceResult, ParsedOutput,
};
