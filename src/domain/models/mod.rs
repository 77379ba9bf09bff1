mod category;
mod chat;
mod error;
mod gateway;
mod language;
mod resume;
mod slash_commands;
mod slot;

pub use category::*;
pub use chat::*;
pub use error::*;
pub use gateway::*;
pub use language::*;
pub use resume::*;
pub use slash_commands::*;
pub use slot::*;
