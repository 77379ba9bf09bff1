pub mod clipboard;
mod orchestrator;
pub mod prompts;
mod session_state;

pub use orchestrator::*;
pub use session_state::*;
