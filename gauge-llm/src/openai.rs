use crate::traits::{LlmClient, LlmResponse};
use async_trait::async_trait;
use gauge_common::{GaugeError, Result};
use gauge_http::{Auth, HttpClient, HttpError, RequestOpts};
use serde::{Deserialize, Serialize};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1/";

pub struct OpenAiClient {
    client: HttpClient,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ResponsesApiRequest {
    model: String,
    input: String,
    instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiResponse {
    model: String,
    #[serde(default)]
    output: Vec<ResponseMessage>,
    #[serde(default)]
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    #[serde(default)]
    total_tokens: Option<u32>,
}

impl OpenAiClient {
    /// Create a client for the given key and model. `base_url` overrides the
    /// public endpoint (gateways, compatible providers, tests).
    pub fn new(api_key: String, model: String, base_url: Option<&str>) -> Result<Self> {
        let client = HttpClient::new(base_url.unwrap_or(OPENAI_API_BASE))
            .map_err(|e| GaugeError::Llm(format!("HttpClient init failed: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        let instructions = system_prompt
            .unwrap_or_else(|| self.default_seo_system_prompt())
            .to_string();

        let req = ResponsesApiRequest {
            model: self.model.clone(),
            input: prompt.to_string(),
            instructions,
            max_output_tokens: max_tokens,
            temperature,
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "openai.generate");

        let resp: ResponsesApiResponse = self
            .client
            .post_json(
                "responses",
                &req,
                RequestOpts {
                    auth: Some(Auth::Bearer(&self.api_key)),
                    ..Default::default()
                },
            )
            .await
            .map_err(http_to_gauge)?;

        let text = resp
            .output
            .iter()
            .flat_map(|msg| &msg.content)
            .find(|c| c.kind == "output_text")
            .map(|c| c.text.clone())
            .unwrap_or_default();

        Ok(LlmResponse {
            text,
            model: Some(resp.model),
            tokens_used: resp.usage.and_then(|u| u.total_tokens),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        // Cheapest possible round trip; a failure is a report, not an error.
        match self
            .generate("Respond with just 'OK'", None, Some(5), Some(0.1))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("OpenAI health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

fn http_to_gauge(e: HttpError) -> GaugeError {
    GaugeError::Llm(format!("{e}"))
}
