pub mod catalog;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::FunctionCall;

pub use catalog::FunctionSpec;

/// One chat-completion message in the OpenAI wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolFunction,
}

/// `arguments` is a JSON document encoded as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    pub arguments: String,
}

impl Message {
    fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: &str) -> Self {
        Self::text("system", content)
    }

    pub fn user(content: &str) -> Self {
        Self::text("user", content)
    }

    /// Echo of the model's own call, required before the matching tool result.
    pub fn assistant_call(call: &FunctionCall) -> Self {
        Self {
            role: "assistant".to_string(),
            content: None,
            tool_calls: vec![ToolCall {
                id: call.id.clone(),
                kind: "function".to_string(),
                function: ToolFunction {
                    name: call.name.clone(),
                    arguments: call.arguments.to_string(),
                },
            }],
            tool_call_id: None,
        }
    }

    pub fn tool_result(call_id: &str, result: &serde_json::Value) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(result.to_string()),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.to_string()),
        }
    }
}

/// What the model answered with.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Reply(String),
    Calls(Vec<FunctionCall>),
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Runs one completion. An empty `functions` slice disables tool use.
    async fn chat(
        &self,
        messages: &[Message],
        functions: &[FunctionSpec],
    ) -> Result<Completion, AppError>;
}
