use clap::{Subcommand, ValueEnum};

use crate::domain::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (POST /chat, GET /health, GET /)
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Send one message through the pipeline and print the result
    Ask {
        message: String,

        #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE)]
        temperature: f64,

        #[arg(short, long, default_value_t = DEFAULT_MAX_TOKENS)]
        max_tokens: u32,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check whether the backend is reachable and serves the model
    Health {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
