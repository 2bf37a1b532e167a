use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fnagent::{serve, Commands, Container, ContainerConfig, OllamaConfig, Router};

#[derive(Parser)]
#[command(name = "fnagent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the Ollama server
    #[arg(
        long,
        global = true,
        env = "OLLAMA_BASE_URL",
        default_value = fnagent::connector::DEFAULT_BASE_URL
    )]
    ollama_url: String,

    /// Model every request is sent to
    #[arg(
        long,
        global = true,
        env = "OLLAMA_MODEL",
        default_value = fnagent::connector::DEFAULT_MODEL
    )]
    model: String,

    /// Upper bound on one generation call, in seconds
    #[arg(long, global = true, env = "OLLAMA_TIMEOUT_SECS", default_value = "120")]
    timeout_secs: u64,

    /// Upper bound on one health probe, in seconds
    #[arg(long, global = true, default_value = "5")]
    health_timeout_secs: u64,

    /// Answer from a built-in mock instead of calling Ollama
    #[arg(long, global = true)]
    mock_backend: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            ollama: OllamaConfig {
                base_url: self.ollama_url.clone(),
                model: self.model.clone(),
                request_timeout: Duration::from_secs(self.timeout_secs),
                discovery_timeout: Duration::from_secs(self.health_timeout_secs),
            },
            mock_backend: self.mock_backend,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let container = Container::new(cli.container_config())?;

    if let Commands::Serve { host, port } = &cli.command {
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid listen address {host}:{port}"))?;
        if container.mock_backend() {
            info!("Mock backend enabled; Ollama will not be contacted");
        }
        return serve(Arc::new(container), addr).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
