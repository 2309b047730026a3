use crate::NarrativeGenerator;
use crate::error::NarratorError;
use crate::prompt::build_prompt;
use async_trait::async_trait;
use configuration::NarrativeSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The JSON payload for the Ollama `/api/generate` endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool, // One JSON object instead of a stream of chunks.
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// A client for an Ollama-compatible text-generation server.
pub struct OllamaNarrator {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaNarrator {
    pub fn new(settings: &NarrativeSettings) -> Result<Self, NarratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
        })
    }
}

#[async_trait]
impl NarrativeGenerator for OllamaNarrator {
    async fn generate(&self, brief: &str) -> Result<String, NarratorError> {
        let url = format!("{}/api/generate", self.endpoint);
        let prompt = build_prompt(brief);

        let payload = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
        };

        tracing::debug!(%url, model = %self.model, "Requesting narrative.");
        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to decode error response".to_string());
            return Err(NarratorError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| NarratorError::Deserialization(e.to_string()))?;

        if parsed.response.trim().is_empty() {
            return Err(NarratorError::EmptyResponse);
        }
        Ok(parsed.response)
    }
}
