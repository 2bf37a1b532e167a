use crate::cli::OutputFormat;
use crate::domain::HealthStatus;

use super::super::Container;

pub struct HealthController<'a> {
    container: &'a Container,
}

impl<'a> HealthController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn health(&self) -> HealthStatus {
        self.container.health_use_case().execute().await
    }

    pub async fn report(&self, format: OutputFormat) -> anyhow::Result<String> {
        let status = self.health().await;
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&status)?),
            OutputFormat::Text => Ok(self.format_status(&status)),
        }
    }

    fn format_status(&self, status: &HealthStatus) -> String {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        format!(
            "Status:          {}\nBackend:         {}\nConnected:       {}\nModel:           {}\nModel available: {}",
            status.status(),
            self.container.backend_url(),
            yes_no(status.backend_reachable()),
            self.container.model(),
            yes_no(status.model_available())
        )
    }
}
