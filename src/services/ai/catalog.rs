use serde::Serialize;
use serde_json::json;

use crate::models::{BookingStatus, FunctionName};

/// Declaration of one callable operation, as attached to a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: serde_json::Value,
}

impl FunctionSpec {
    /// OpenAI `tools` entry.
    pub fn to_tool(&self) -> serde_json::Value {
        json!({
            "type": "function",
            "function": self,
        })
    }
}

pub fn booking_functions() -> Vec<FunctionSpec> {
    FunctionName::ALL.into_iter().map(spec).collect()
}

fn spec(name: FunctionName) -> FunctionSpec {
    match name {
        FunctionName::CreateBooking => FunctionSpec {
            name: name.as_str(),
            description: "Create a new booking on cal.com for the given attendee and start time.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "event_type_id": {
                        "type": "string",
                        "description": "Numeric cal.com event type id. Omit to use the default event type."
                    },
                    "start_time": {
                        "type": "string",
                        "description": "Start of the booking as an ISO-8601 timestamp with offset, e.g. 2025-01-01T10:00:00Z."
                    },
                    "name": {"type": "string", "description": "Attendee full name."},
                    "email": {"type": "string", "format": "email", "description": "Attendee email."},
                    "notes": {"type": "string", "description": "Optional note for the host."}
                },
                "required": ["start_time", "name", "email"]
            }),
        },
        FunctionName::ListBookings => {
            let statuses: Vec<&str> = BookingStatus::ALL.iter().map(|s| s.as_str()).collect();
            FunctionSpec {
                name: name.as_str(),
                description: "List bookings for a user by email.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "user_email": {
                            "type": "string",
                            "format": "email",
                            "description": "Attendee email. Defaults to the requesting user."
                        },
                        "status": {"type": "string", "enum": statuses}
                    },
                    "required": []
                }),
            }
        }
        FunctionName::CancelBooking => FunctionSpec {
            name: name.as_str(),
            description: "Cancel an existing booking by booking id.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "booking_id": {"type": "string", "description": "Booking uid."},
                    "reason": {"type": "string", "description": "Optional cancellation reason."}
                },
                "required": ["booking_id"]
            }),
        },
    }
}
