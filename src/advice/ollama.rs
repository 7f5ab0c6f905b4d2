//! Advice provider backed by a local Ollama server (blocking HTTP)

use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AdviceProvider;
use crate::config::AdviceSettings;
use crate::error::{FinanceError, FinanceResult};

const SYSTEM_PROMPT: &str =
    "You are a concise personal-finance advisor. Always answer with a single JSON object.";

/// Single-turn chat client for Ollama's `/api/chat`
#[derive(Debug, Clone)]
pub struct OllamaAdviceProvider {
    http: Client,
    base_url: Url,
    model: String,
}

impl OllamaAdviceProvider {
    pub fn new(settings: &AdviceSettings) -> FinanceResult<Self> {
        Self::build(settings).map_err(|e| FinanceError::Advice(format!("{:#}", e)))
    }

    fn build(settings: &AdviceSettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("Invalid advice base URL: {}", settings.base_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            model: settings.model.clone(),
        })
    }

    fn chat(&self, user_prompt: &str) -> anyhow::Result<String> {
        let endpoint = self
            .base_url
            .join("api/chat")
            .context("Failed to build Ollama /api/chat URL")?;

        let request = ChatRequest {
            model: self.model.clone(),
            stream: false,
            format: Some("json".to_string()),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
        };

        debug!(%endpoint, model = %self.model, "requesting advice");

        let response: ChatResponse = self
            .http
            .post(endpoint.clone())
            .json(&request)
            .send()
            .with_context(|| format!("POST {endpoint} failed"))?
            .error_for_status()
            .with_context(|| format!("POST {endpoint} returned non-success status"))?
            .json()
            .with_context(|| format!("Failed to parse JSON response from {endpoint}"))?;

        let content = response
            .message
            .map(|m| m.content)
            .ok_or_else(|| anyhow!("Ollama response had no message content"))?;

        Ok(content.trim().to_string())
    }
}

impl AdviceProvider for OllamaAdviceProvider {
    fn complete(&self, prompt: &str) -> FinanceResult<String> {
        self.chat(prompt)
            .map_err(|e| FinanceError::Advice(format!("{:#}", e)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let settings = AdviceSettings {
            base_url: "not a url".into(),
            ..AdviceSettings::default()
        };
        let err = OllamaAdviceProvider::new(&settings).unwrap_err();
        assert!(matches!(err, FinanceError::Advice(_)));
    }

    #[test]
    fn test_unreachable_server_is_advice_error() {
        let settings = AdviceSettings {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..AdviceSettings::default()
        };
        let provider = OllamaAdviceProvider::new(&settings).unwrap();
        let err = provider.complete("hello").unwrap_err();
        assert!(matches!(err, FinanceError::Advice(_)));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "llama3.2".into(),
            messages: vec![],
            stream: false,
            format: Some("json".into()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["format"], "json");
        assert_eq!(value["stream"], false);
    }
}
