mod chat;
mod health_check;

pub use chat::*;
pub use health_check::*;
