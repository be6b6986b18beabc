pub mod assistant_service;
pub mod extract;
pub mod models;
pub mod prompt;

pub use assistant_service::{AiError, AssistantService, CompletionProvider};
pub use models::{AiConfig, AiMessage, AnalysisReport};
