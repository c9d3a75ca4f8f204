pub mod booking;
pub mod chat;
pub mod function_call;
pub mod validate;

pub use booking::{
    Attendee, AttendeeDefaults, BookRequest, BookingList, BookingPayload, BookingQuery,
    BookingStatus, CancelBody, CancelRequest, EventTypeId, ListRequest, SlotsQuery, SlotsRequest,
};
pub use chat::{ChatRequest, ChatResponse};
pub use function_call::{
    BookingCommand, CancelBookingArgs, CreateBookingArgs, FunctionCall, FunctionName,
    ListBookingsArgs,
};
