use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{BookingPayload, BookingQuery, CancelBody, SlotsQuery};

const SERVICE: &str = "cal.com";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Scheduling provider operations. Records are passed through uninterpreted.
#[async_trait]
pub trait BookingProvider: Send + Sync {
    async fn create_booking(&self, payload: &BookingPayload) -> Result<serde_json::Value, AppError>;

    async fn list_bookings(&self, query: &BookingQuery) -> Result<Vec<serde_json::Value>, AppError>;

    async fn cancel_booking(
        &self,
        booking_uid: &str,
        body: &CancelBody,
    ) -> Result<serde_json::Value, AppError>;

    async fn available_slots(&self, query: &SlotsQuery) -> Result<serde_json::Value, AppError>;
}

/// Cal.com v2 API client.
///
/// Every endpoint needs a `cal-api-version` header; bookings and slots are
/// versioned separately.
pub struct CalComClient {
    base_url: Url,
    api_version_bookings: String,
    api_version_slots: String,
    client: reqwest::Client,
}

impl CalComClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        if config.cal_api_key.is_empty() {
            return Err(AppError::Config("CAL_COM_API_KEY must be set".to_string()));
        }

        let base_url = Url::parse(&config.cal_base_url)
            .map_err(|e| AppError::Config(format!("CAL_COM_BASE_URL {:?}: {e}", config.cal_base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "CAL_COM_BASE_URL {:?} cannot be used as a base URL",
                config.cal_base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.cal_api_key))
            .map_err(|_| AppError::Config("CAL_COM_API_KEY contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build cal.com HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            api_version_bookings: config.cal_api_version_bookings.clone(),
            api_version_slots: config.cal_api_version_slots.clone(),
            client,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base() was ruled out in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn transport(source: reqwest::Error) -> AppError {
    AppError::Transport {
        service: SERVICE,
        source,
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response, operation: &str) -> Result<T, AppError> {
    let status = resp.status();
    let body = resp.text().await.map_err(transport)?;

    if !status.is_success() {
        tracing::warn!(operation, status = status.as_u16(), body = %body, "cal.com returned an error");
        return Err(AppError::Booking {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| AppError::MalformedResponse {
        service: SERVICE,
        reason: format!("{operation}: {e}"),
    })
}

/// `GET /v2/bookings` wraps records as `{"status": "success", "data": [...], "pagination": {...}}`.
fn bookings_from_envelope(envelope: serde_json::Value) -> Result<Vec<serde_json::Value>, AppError> {
    match envelope.get("data") {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(serde_json::Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(AppError::MalformedResponse {
            service: SERVICE,
            reason: format!("list_bookings: expected data array, got {other}"),
        }),
    }
}

#[async_trait]
impl BookingProvider for CalComClient {
    async fn create_booking(&self, payload: &BookingPayload) -> Result<serde_json::Value, AppError> {
        tracing::info!(
            event_type_id = %payload.event_type_id,
            start = %payload.start,
            "creating cal.com booking"
        );

        let resp = self
            .client
            .post(self.url(&["v2", "bookings"]))
            .header("cal-api-version", &self.api_version_bookings)
            .json(payload)
            .send()
            .await
            .map_err(transport)?;

        read_json(resp, "create_booking").await
    }

    async fn list_bookings(&self, query: &BookingQuery) -> Result<Vec<serde_json::Value>, AppError> {
        let resp = self
            .client
            .get(self.url(&["v2", "bookings"]))
            .header("cal-api-version", &self.api_version_bookings)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let envelope: serde_json::Value = read_json(resp, "list_bookings").await?;
        let bookings = bookings_from_envelope(envelope)?;
        tracing::debug!(count = bookings.len(), "listed cal.com bookings");
        Ok(bookings)
    }

    async fn cancel_booking(
        &self,
        booking_uid: &str,
        body: &CancelBody,
    ) -> Result<serde_json::Value, AppError> {
        tracing::info!(booking_id = booking_uid, "cancelling cal.com booking");

        let resp = self
            .client
            .post(self.url(&["v2", "bookings", booking_uid, "cancel"]))
            .header("cal-api-version", &self.api_version_bookings)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        read_json(resp, "cancel_booking").await
    }

    async fn available_slots(&self, query: &SlotsQuery) -> Result<serde_json::Value, AppError> {
        let resp = self
            .client
            .get(self.url(&["v2", "slots"]))
            .header("cal-api-version", &self.api_version_slots)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        read_json(resp, "available_slots").await
    }
}
