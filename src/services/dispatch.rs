use crate::errors::AppError;
use crate::models::{
    BookingCommand, BookingPayload, BookingQuery, CancelBody, ChatRequest, ChatResponse,
    CreateBookingArgs, FunctionCall,
};
use crate::models::validate;
use crate::services::ai::catalog::booking_functions;
use crate::services::ai::{Completion, Message};
use crate::state::AppState;

const SYSTEM_PROMPT: &str = "You are an assistant that helps users book, list and cancel events using Cal.com. \
Use the provided functions when the user asks for one of those operations. \
Ask clarifying questions if required details such as the start time are missing. \
When a function result is provided, summarise it for the user in one or two sentences.";

/// Runs one chat turn: the model either answers directly or picks a single
/// booking operation, which is executed and then summarised.
pub async fn process_chat(state: &AppState, req: &ChatRequest) -> Result<ChatResponse, AppError> {
    let mut messages = vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(&format!("{} (user email: {})", req.message, req.user_email)),
    ];

    let calls = match state.llm.chat(&messages, &booking_functions()).await? {
        Completion::Reply(text) => return Ok(ChatResponse::reply(text)),
        Completion::Calls(calls) => calls,
    };

    let mut calls = calls.into_iter();
    let Some(call) = calls.next() else {
        return Err(AppError::MalformedResponse {
            service: "openai",
            reason: "empty tool call list".to_string(),
        });
    };
    let dropped: Vec<String> = calls.map(|c| c.name).collect();
    if !dropped.is_empty() {
        tracing::warn!(
            function = %call.name,
            ?dropped,
            "model returned several function calls, executing only the first"
        );
    }

    let command = call.command()?;
    tracing::info!(function = %call.name, user_email = %req.user_email, "dispatching function call");

    let result = execute(state, command, &req.user_email).await?;

    let message = if state.config.chat_summarize {
        summarize(state, &mut messages, &call, &result).await?
    } else {
        format!("{} completed", call.name)
    };

    Ok(ChatResponse {
        function_called: Some(call.name),
        arguments: Some(call.arguments),
        function_result: Some(result),
        message,
    })
}

async fn summarize(
    state: &AppState,
    messages: &mut Vec<Message>,
    call: &FunctionCall,
    result: &serde_json::Value,
) -> Result<String, AppError> {
    messages.push(Message::assistant_call(call));
    messages.push(Message::tool_result(&call.id, result));

    match state.llm.chat(messages.as_slice(), &[]).await? {
        Completion::Reply(text) => Ok(text),
        Completion::Calls(_) => {
            tracing::warn!(function = %call.name, "model asked for another call after the result");
            Ok(format!("{} completed", call.name))
        }
    }
}

/// Executes a decoded command against the booking provider.
pub async fn execute(
    state: &AppState,
    command: BookingCommand,
    user_email: &str,
) -> Result<serde_json::Value, AppError> {
    match command {
        BookingCommand::Create(args) => {
            let payload = chat_booking_payload(state, &args)?;
            state.cal.create_booking(&payload).await
        }
        BookingCommand::List(args) => {
            // A blank email would drop the attendee filter upstream.
            let email = match args.user_email.as_deref().map(str::trim) {
                Some(email) if !email.is_empty() => {
                    validate::email("user_email", email)
                        .map_err(|e| AppError::invalid_arguments("list_bookings", e))?;
                    email
                }
                _ => user_email,
            };
            let bookings = state
                .cal
                .list_bookings(&BookingQuery::for_attendee(email, args.status))
                .await?;
            Ok(serde_json::Value::Array(bookings))
        }
        BookingCommand::Cancel(args) => {
            validate::require("booking_id", &args.booking_id)
                .map_err(|e| AppError::invalid_arguments("cancel_booking", e))?;
            let body = CancelBody {
                cancellation_reason: args.reason,
            };
            state.cal.cancel_booking(&args.booking_id, &body).await
        }
    }
}

fn chat_booking_payload(
    state: &AppState,
    args: &CreateBookingArgs,
) -> Result<BookingPayload, AppError> {
    let invalid = |e: AppError| AppError::invalid_arguments("create_booking", e);

    let event_type_id = args
        .event_type_id
        .or(state.config.default_event_type_id)
        .ok_or_else(|| {
            AppError::invalid_arguments(
                "create_booking",
                "event_type_id missing and no default event type configured",
            )
        })?;
    validate::timestamp("start_time", &args.start_time).map_err(invalid)?;
    validate::require("name", &args.name).map_err(invalid)?;
    validate::email("email", &args.email).map_err(invalid)?;

    let payload = BookingPayload::new(
        event_type_id,
        &args.start_time,
        &args.name,
        &args.email,
        &state.attendee_defaults(),
    );
    Ok(payload.with_note(args.notes.as_deref().unwrap_or("chat booking")))
}
