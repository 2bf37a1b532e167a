use anyhow::Result;

use crate::cli::Commands;

use super::container::Container;
use super::controller::{ChatController, HealthController};

/// Dispatches one-shot CLI commands to their controllers.
pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    health_controller: HealthController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            health_controller: HealthController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask {
                message,
                temperature,
                max_tokens,
                format,
            } => {
                self.chat_controller
                    .ask(message, temperature, max_tokens, format)
                    .await
            }
            Commands::Health { format } => self.health_controller.report(format).await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}
