use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{
    BookRequest, BookingList, BookingQuery, CancelBody, CancelRequest, ListRequest, SlotsQuery,
    SlotsRequest,
};
use crate::state::AppState;

// POST /book
pub async fn book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let record = state
        .cal
        .create_booking(&req.to_payload(&state.attendee_defaults()))
        .await?;

    Ok(Json(record))
}

// POST /list
pub async fn list(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ListRequest>, JsonRejection>,
) -> Result<Json<BookingList>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let bookings = state
        .cal
        .list_bookings(&BookingQuery::for_attendee(&req.user_email, req.status))
        .await?;

    Ok(Json(BookingList { bookings }))
}

// POST /cancel
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let body = CancelBody {
        cancellation_reason: req.reason,
    };
    let confirmation = state.cal.cancel_booking(&req.booking_id, &body).await?;

    Ok(Json(confirmation))
}

// POST /slots
pub async fn slots(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SlotsRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let query = SlotsQuery {
        event_type_id: req.event_type_id,
        start: req.start,
        end: req.end,
        time_zone: req.time_zone.unwrap_or_else(|| state.config.time_zone.clone()),
    };
    let slots = state.cal.available_slots(&query).await?;

    Ok(Json(slots))
}
