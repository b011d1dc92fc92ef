// src/providers/claude.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{analysis_prompt, http, parse_advice, RawAdvice, StrategyProvider};

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

pub struct Claude;

#[async_trait]
impl StrategyProvider for Claude {
    fn name(&self) -> &'static str {
        "Claude"
    }

    async fn advise(&self, hole: &[String], community: &[String]) -> Result<RawAdvice, String> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| "ANTHROPIC_API_KEY not found in environment".to_string())?;

        let request = ClaudeRequest {
            model: "claude-3-5-haiku-20241022".to_string(),
            max_tokens: 800,
            messages: vec![Message {
                role: "user",
                content: analysis_prompt(hole, community),
            }],
        };

        let response = http()
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Claude API error: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Claude API error ({}): {}", status, error_text));
        }

        let claude_response: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Claude response: {}", e))?;

        let content = claude_response
            .content
            .first()
            .map(|c| c.text.as_str())
            .ok_or("No response from Claude")?;

        parse_advice(content)
    }
}
