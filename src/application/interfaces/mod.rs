mod inference_gateway;

pub use inference_gateway::*;
