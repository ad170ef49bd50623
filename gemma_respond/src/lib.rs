pub mod inference;
pub mod model;
pub mod prompt;

pub use inference::{GenerationClient, GenerationError, GenerationRequest, GenerationResult};
pub use model::conversation::{ChatConversation, ChatMessage, Role};
pub use prompt::format_prompt;
