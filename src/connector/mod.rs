//! # Connector Layer
//!
//! External integrations:
//! - Inference gateways (Ollama over HTTP, in-process mock)
//! - HTTP API and CLI command routing

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
