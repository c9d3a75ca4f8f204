use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{BookingStatus, EventTypeId};

/// Operations the model may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionName {
    CreateBooking,
    ListBookings,
    CancelBooking,
}

impl FunctionName {
    pub const ALL: [FunctionName; 3] = [
        FunctionName::CreateBooking,
        FunctionName::ListBookings,
        FunctionName::CancelBooking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionName::CreateBooking => "create_booking",
            FunctionName::ListBookings => "list_bookings",
            FunctionName::CancelBooking => "cancel_booking",
        }
    }
}

impl FromStr for FunctionName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionName::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| AppError::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function invocation as returned by the model, arguments already JSON-decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateBookingArgs {
    pub event_type_id: Option<EventTypeId>,
    pub start_time: String,
    #[serde(alias = "customer_name")]
    pub name: String,
    #[serde(alias = "customer_email")]
    pub email: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ListBookingsArgs {
    pub user_email: Option<String>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CancelBookingArgs {
    pub booking_id: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingCommand {
    Create(CreateBookingArgs),
    List(ListBookingsArgs),
    Cancel(CancelBookingArgs),
}

impl FunctionCall {
    /// Resolves the call against the catalog and decodes its arguments.
    pub fn command(&self) -> Result<BookingCommand, AppError> {
        let name: FunctionName = self.name.parse()?;
        let command = match name {
            FunctionName::CreateBooking => BookingCommand::Create(self.decode(name)?),
            FunctionName::ListBookings => BookingCommand::List(self.decode(name)?),
            FunctionName::CancelBooking => BookingCommand::Cancel(self.decode(name)?),
        };
        Ok(command)
    }

    fn decode<T: DeserializeOwned>(&self, name: FunctionName) -> Result<T, AppError> {
        // Models send `{}` or nothing at all for argument-less calls.
        let args = match &self.arguments {
            serde_json::Value::Null => serde_json::json!({}),
            other => other.clone(),
        };
        serde_json::from_value(args).map_err(|e| AppError::invalid_arguments(name.as_str(), e))
    }
}
