use async_trait::async_trait;
use gauge_common::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub model: Option<String>,
    pub tokens_used: Option<u32>,
}

/// Report-generator capability. The SEO prompt layer in [`crate::seo`] sits
/// on top of this; implementations only have to move text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a response to the given prompt with optional system prompt.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse>;

    /// Check if the LLM service is available.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;

    /// Default system prompt for SEO report generation.
    fn default_seo_system_prompt(&self) -> &str {
        "You are an expert SEO consultant providing actionable advice for website optimization. \
         Be precise and factual, ground every observation in the supplied page data, and prefer \
         concrete recommendations over generalities."
    }
}
