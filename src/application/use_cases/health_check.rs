use std::sync::Arc;

use tracing::debug;

use crate::application::InferenceGateway;
use crate::domain::HealthStatus;

pub struct HealthCheckUseCase {
    gateway: Arc<dyn InferenceGateway>,
}

impl HealthCheckUseCase {
    pub fn new(gateway: Arc<dyn InferenceGateway>) -> Self {
        Self { gateway }
    }

    /// Probes the backend afresh. Never fails.
    pub async fn execute(&self) -> HealthStatus {
        let probe = self.gateway.discover().await;
        debug!(
            "Health probe for {}: reachable={}, model_available={}",
            self.gateway.backend_url(),
            probe.reachable,
            probe.model_available
        );
        HealthStatus::from_probe(probe)
    }
}
