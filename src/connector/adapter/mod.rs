mod mock_gateway;
mod ollama_gateway;

pub use mock_gateway::*;
pub use ollama_gateway::*;
