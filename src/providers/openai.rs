// src/providers/openai.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{analysis_prompt, http, parse_advice, RawAdvice, StrategyProvider, SYSTEM_PROMPT};

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

pub struct OpenAi;

#[async_trait]
impl StrategyProvider for OpenAi {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    async fn advise(&self, hole: &[String], community: &[String]) -> Result<RawAdvice, String> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY not found in environment".to_string())?;

        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: analysis_prompt(hole, community),
                },
            ],
            temperature: 0.2,
            max_tokens: 600,
        };

        let response = http()
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("OpenAI API error: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("OpenAI API error ({}): {}", status, error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse OpenAI response: {}", e))?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or("No response from OpenAI")?;

        parse_advice(content)
    }
}
