use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },

    #[error("cal.com error ({status}): {body}")]
    Booking { status: u16, body: String },

    #[error("LLM API error ({status}): {body}")]
    Llm { status: u16, body: String },

    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected {service} response: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },
}

impl AppError {
    pub fn invalid_arguments(function: &str, reason: impl ToString) -> Self {
        AppError::InvalidArguments {
            function: function.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownFunction(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidArguments { .. } => StatusCode::BAD_REQUEST,
            // Only statuses caused by the caller's input are relayed; auth and rate limits are ours.
            AppError::Booking { status, .. } => match *status {
                400 | 404 | 409 | 422 => StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Llm { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MalformedResponse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

fn upstream_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Booking {
                status: upstream,
                body,
            }
            | AppError::Llm {
                status: upstream,
                body,
            } => serde_json::json!({
                "error": self.to_string(),
                "upstream_status": upstream,
                "upstream_body": upstream_body(body),
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        (status, axum::Json(body)).into_response()
    }
}
