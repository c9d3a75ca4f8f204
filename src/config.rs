use std::env;

use crate::errors::AppError;
use crate::models::EventTypeId;

pub const DEFAULT_CAL_BASE_URL: &str = "https://api.cal.com";
pub const DEFAULT_CAL_API_VERSION_BOOKINGS: &str = "2024-08-13";
pub const DEFAULT_CAL_API_VERSION_SLOTS: &str = "2024-09-04";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub cal_api_key: String,
    pub cal_base_url: String,
    pub cal_api_version_bookings: String,
    pub cal_api_version_slots: String,
    pub default_event_type_id: Option<EventTypeId>,
    pub time_zone: String,
    pub language: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub chat_summarize: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };

        let default_event_type_id = match get("CAL_COM_DEFAULT_EVENT_TYPE_ID") {
            Some(raw) => Some(EventTypeId::parse(&raw).map_err(|e| {
                AppError::Config(format!("CAL_COM_DEFAULT_EVENT_TYPE_ID: {e}"))
            })?),
            None => None,
        };

        let chat_summarize = match get("CHAT_SUMMARIZE").as_deref() {
            None => true,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "CHAT_SUMMARIZE must be true or false, got {other:?}"
                )))
            }
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("PORT must be a port number, got {raw:?}")))?,
            None => 8000,
        };

        Ok(Self {
            port,
            cal_api_key: required("CAL_COM_API_KEY")?,
            cal_base_url: get("CAL_COM_BASE_URL").unwrap_or_else(|| DEFAULT_CAL_BASE_URL.to_string()),
            cal_api_version_bookings: get("CAL_COM_API_VERSION_BOOKINGS")
                .unwrap_or_else(|| DEFAULT_CAL_API_VERSION_BOOKINGS.to_string()),
            cal_api_version_slots: get("CAL_COM_API_VERSION_SLOTS")
                .unwrap_or_else(|| DEFAULT_CAL_API_VERSION_SLOTS.to_string()),
            default_event_type_id,
            time_zone: get("CAL_COM_TIME_ZONE").unwrap_or_else(|| "America/Los_Angeles".to_string()),
            language: get("CAL_COM_LANGUAGE").unwrap_or_else(|| "en".to_string()),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            chat_summarize,
        })
    }
}
