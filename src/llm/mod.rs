pub mod openai;
pub mod prompt;

use crate::errors::Result;

pub use openai::OpenAiClient;
pub use prompt::{build_prompt, Prompt};

/// Seam between the pipeline and the model endpoint. Tests substitute a
/// scripted implementation; production uses `OpenAiClient`.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt, return the raw completion text.
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}
