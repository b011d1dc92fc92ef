// src/providers/ollama.rs
// Local model stand-in. Needs no credentials, so it is always last in the
// priority list and keeps the advisor functional without any API keys.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{analysis_prompt, http, parse_advice, RawAdvice, StrategyProvider};

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct Ollama;

impl Ollama {
    fn base_url() -> String {
        std::env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string())
    }

    fn model() -> String {
        std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.1:8b".to_string())
    }
}

#[async_trait]
impl StrategyProvider for Ollama {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn advise(&self, hole: &[String], community: &[String]) -> Result<RawAdvice, String> {
        let request = GenerateRequest {
            model: Self::model(),
            prompt: analysis_prompt(hole, community),
            stream: false,
            options: GenerateOptions {
                temperature: 0.2,
                top_p: 0.9,
            },
        };

        let response = http()
            .post(format!("{}/api/generate", Self::base_url()))
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Ollama API error: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Ollama API error ({}): {}", status, error_text));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Ollama response: {}", e))?;

        if generate_response.response.trim().is_empty() {
            return Err("No response from Ollama".to_string());
        }

        parse_advice(&generate_response.response)
    }
}
