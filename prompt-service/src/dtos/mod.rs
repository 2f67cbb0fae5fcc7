pub mod prompts;

pub use prompts::{ImageUrlResponse, PromptRequest, TextCompletionResponse};
