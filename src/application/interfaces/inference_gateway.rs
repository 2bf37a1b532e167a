use async_trait::async_trait;

use crate::domain::{BackendProbe, DomainError, FormattedPrompt, GenerationOptions, InferenceResult};

/// Sends prompts to an inference backend and reports on its availability.
///
/// Implementations make exactly one backend call per method invocation and
/// never retry.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// Fails with `BackendUnreachable`, `BackendTimeout`, `BackendStatus` or
    /// `InvalidResponse`.
    async fn generate(
        &self,
        prompt: &FormattedPrompt,
        options: GenerationOptions,
    ) -> Result<InferenceResult, DomainError>;

    /// Check whether the backend answers and lists the configured model.
    /// Never fails; problems are folded into the returned probe.
    async fn discover(&self) -> BackendProbe;

    /// Model identifier requests are sent to.
    fn model_name(&self) -> &str;

    /// Base address of the backend, for diagnostics.
    fn backend_url(&self) -> &str;
}
