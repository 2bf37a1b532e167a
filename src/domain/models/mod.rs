mod chat;
mod control_token;
mod inference;

pub use chat::*;
pub use control_token::*;
pub use inference::*;
