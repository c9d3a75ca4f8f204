use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::validate;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_email: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate::require("message", &self.message)?;
        validate::email("user_email", &self.user_email)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_called: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_result: Option<serde_json::Value>,
    pub message: String,
}

impl ChatResponse {
    pub fn reply(message: String) -> Self {
        Self {
            function_called: None,
            arguments: None,
            function_result: None,
            message,
        }
    }
}
