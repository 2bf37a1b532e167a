//! # Application Layer
//!
//! Use cases wiring the domain pipeline to an inference gateway.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
