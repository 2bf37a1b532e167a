//! # Domain Layer
//!
//! Request/response models, the chat template token table, and the pure
//! services of the chat pipeline (sanitize, format, extract).
//! This layer is independent of HTTP and of the inference backend.

pub mod models;
pub mod services;

pub use models::*;
pub use services::*;
