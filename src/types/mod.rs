// Public modules
pub mod content;
pub mod generate_content;
pub mod model;
pub mod usage_metadata;

// Re-exports
pub use content::{Content, Part, Role};
pub use generate_content::{
    Candidate, FinishReason, GenerateContentRequest, GenerateContentResponse, PromptFeedback,
};
pub use model::{KnownModel, Model};
pub use usage_metadata::UsageMetadata;
