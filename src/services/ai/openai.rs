use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{Completion, FunctionSpec, LlmProvider, Message};
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::FunctionCall;

const SERVICE: &str = "openai";
const TIMEOUT: Duration = Duration::from_secs(60);

pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        if config.openai_api_key.is_empty() {
            return Err(AppError::Config("OPENAI_API_KEY must be set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build OpenAI HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
            client,
        })
    }
}

fn malformed(reason: impl Into<String>) -> AppError {
    AppError::MalformedResponse {
        service: SERVICE,
        reason: reason.into(),
    }
}

/// Reads the first choice: tool calls win over content.
fn parse_completion(data: &serde_json::Value) -> Result<Completion, AppError> {
    let message = &data["choices"][0]["message"];
    if message.is_null() {
        return Err(malformed(format!("missing choices[0].message in {data}")));
    }

    if let Some(tool_calls) = message["tool_calls"].as_array().filter(|c| !c.is_empty()) {
        let calls = tool_calls
            .iter()
            .map(parse_tool_call)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Completion::Calls(calls));
    }

    message["content"]
        .as_str()
        .map(|s| Completion::Reply(s.to_string()))
        .ok_or_else(|| malformed("missing content in chat completion"))
}

fn parse_tool_call(call: &serde_json::Value) -> Result<FunctionCall, AppError> {
    let name = call["function"]["name"]
        .as_str()
        .ok_or_else(|| malformed(format!("tool call missing name: {call}")))?;
    let id = call["id"]
        .as_str()
        .ok_or_else(|| malformed(format!("tool call missing id: {call}")))?;

    let arguments = match &call["function"]["arguments"] {
        serde_json::Value::String(raw) if raw.trim().is_empty() => json!({}),
        serde_json::Value::String(raw) => serde_json::from_str(raw)
            .map_err(|e| AppError::invalid_arguments(name, format!("arguments are not JSON ({e})")))?,
        serde_json::Value::Null => json!({}),
        // Some OpenAI-compatible servers send the object directly.
        other => other.clone(),
    };

    Ok(FunctionCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    })
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(
        &self,
        messages: &[Message],
        functions: &[FunctionSpec],
    ) -> Result<Completion, AppError> {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0.2,
        });

        if !functions.is_empty() {
            let tools: Vec<serde_json::Value> = functions.iter().map(FunctionSpec::to_tool).collect();
            body["tools"] = json!(tools);
            body["tool_choice"] = json!("auto");
            body["parallel_tool_calls"] = json!(false);
        }

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| AppError::Transport {
                service: SERVICE,
                source,
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|source| AppError::Transport {
            service: SERVICE,
            source,
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %text, "chat completion failed");
            return Err(AppError::Llm {
                status: status.as_u16(),
                body: text,
            });
        }

        let data: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| malformed(format!("chat completion is not JSON ({e})")))?;

        parse_completion(&data)
    }
}
