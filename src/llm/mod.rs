//! Generative language model access

use async_trait::async_trait;

pub mod gemini;

pub use gemini::GeminiClient;

/// Text-in, text-out model seam
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> crate::Result<String>;
}
