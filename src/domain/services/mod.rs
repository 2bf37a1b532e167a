//! Domain services: the synchronous steps of the chat pipeline.

mod error;
mod prompt_formatter;
mod response_extractor;
mod sanitizer;

pub use error::*;
pub use prompt_formatter::*;
pub use response_extractor::*;
pub use sanitizer::*;
