use crate::error::ResolveError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// The external text-extraction service: prompt in, parsed JSON out.
///
/// A transport failure or a response that is not valid JSON is a
/// [`ResolveError::Service`]; callers treat it as "no result", never a crash.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract_json(&self, prompt: &str) -> Result<Value, ResolveError>;
}

/// Ollama-backed extraction service using the `/api/generate` endpoint with
/// JSON-constrained output.
pub struct OllamaService {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaService {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        OllamaService {
            client,
            base_url,
            model,
        }
    }
}

#[async_trait]
impl ExtractionService for OllamaService {
    async fn extract_json(&self, prompt: &str) -> Result<Value, ResolveError> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "format": "json"
            }))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ResolveError::Service(format!("request failed: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ResolveError::Service(format!("invalid response body: {e}")))?;
        debug!("Ollama response: {:?}", body);

        let content = body["response"]
            .as_str()
            .ok_or_else(|| ResolveError::Service("response field missing".to_string()))?;

        serde_json::from_str(content)
            .map_err(|e| ResolveError::Service(format!("model output is not JSON: {e}")))
    }
}
