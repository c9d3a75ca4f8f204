use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::validate;

/// Provider identifier of a bookable event type. Accepted as a JSON number or a
/// numeric string, always sent upstream as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEventTypeId")]
pub struct EventTypeId(pub u64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEventTypeId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawEventTypeId> for EventTypeId {
    type Error = String;

    fn try_from(raw: RawEventTypeId) -> Result<Self, Self::Error> {
        match raw {
            RawEventTypeId::Number(n) if n > 0 => Ok(EventTypeId(n)),
            RawEventTypeId::Number(n) => Err(format!("event type id must be positive, got {n}")),
            RawEventTypeId::Text(s) => EventTypeId::parse(&s),
        }
    }
}

impl EventTypeId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(EventTypeId(n)),
            _ => Err(format!("event type id must be a positive integer, got {raw:?}")),
        }
    }
}

impl fmt::Display for EventTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Upcoming,
    Recurring,
    Past,
    Cancelled,
    Unconfirmed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Upcoming,
        BookingStatus::Recurring,
        BookingStatus::Past,
        BookingStatus::Cancelled,
        BookingStatus::Unconfirmed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Upcoming => "upcoming",
            BookingStatus::Recurring => "recurring",
            BookingStatus::Past => "past",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Unconfirmed => "unconfirmed",
        }
    }
}

/// Attendee settings that are not part of any request.
#[derive(Debug, Clone)]
pub struct AttendeeDefaults {
    pub time_zone: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub name: String,
    pub email: String,
    pub time_zone: String,
    pub language: String,
}

/// Body of `POST /v2/bookings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub event_type_id: EventTypeId,
    pub start: String,
    pub attendee: Attendee,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl BookingPayload {
    pub fn new(
        event_type_id: EventTypeId,
        start: &str,
        name: &str,
        email: &str,
        defaults: &AttendeeDefaults,
    ) -> Self {
        Self {
            event_type_id,
            start: start.to_string(),
            attendee: Attendee {
                name: name.to_string(),
                email: email.to_string(),
                time_zone: defaults.time_zone.clone(),
                language: defaults.language.clone(),
            },
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.metadata.insert("note".to_string(), note.to_string());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookRequest {
    pub event_type_id: EventTypeId,
    pub start_time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub notes: Option<String>,
}

impl BookRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate::timestamp("start_time", &self.start_time)?;
        validate::require("customer_name", &self.customer_name)?;
        validate::email("customer_email", &self.customer_email)
    }

    pub fn to_payload(&self, defaults: &AttendeeDefaults) -> BookingPayload {
        BookingPayload::new(
            self.event_type_id,
            &self.start_time,
            &self.customer_name,
            &self.customer_email,
            defaults,
        )
        .with_note(self.notes.as_deref().unwrap_or("API booking"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListRequest {
    pub user_email: String,
    pub status: Option<BookingStatus>,
}

impl ListRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate::email("user_email", &self.user_email)
    }
}

/// Query string of `GET /v2/bookings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendee_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    pub take: u32,
}

impl BookingQuery {
    pub const PAGE_SIZE: u32 = 100;

    pub fn for_attendee(email: &str, status: Option<BookingStatus>) -> Self {
        Self {
            attendee_email: Some(email.to_string()),
            status,
            take: Self::PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelRequest {
    pub booking_id: String,
    pub reason: Option<String>,
}

impl CancelRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate::require("booking_id", &self.booking_id)
    }
}

/// Body of `POST /v2/bookings/{uid}/cancel`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotsRequest {
    pub event_type_id: EventTypeId,
    pub start: String,
    pub end: String,
    pub time_zone: Option<String>,
}

impl SlotsRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate::timestamp("start", &self.start)?;
        validate::timestamp("end", &self.end)
    }
}

/// Query string of `GET /v2/slots`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsQuery {
    pub event_type_id: EventTypeId,
    pub start: String,
    pub end: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingList {
    pub bookings: Vec<serde_json::Value>,
}
