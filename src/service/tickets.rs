//! Ticket handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};

use super::{is_present, ApiError, JsonObject, MessageResponse};
use crate::observability::metrics::{record_status_update, record_ticket_created};
use crate::server::ServerState;
use crate::storage::tickets::{insert_ticket, list_tickets, update_status, NewTicket};
use crate::ticket::TicketStatus;

/// Payload fields of POST /ticket/create. Any `status` sent by the client
/// is ignored.
const TICKET_FIELDS: [&str; 4] = ["student_id", "service", "priority", "assigned_department"];

/// Parse a ticket id path segment.
///
/// Only plain ASCII digits match; signs, whitespace and values beyond
/// `i64` are treated as a non-matching route.
fn parse_ticket_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Handle POST /ticket/create.
#[tracing::instrument(skip_all)]
pub async fn create_ticket(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(mut req) = body?;

    if !TICKET_FIELDS.iter().all(|field| is_present(req.get(*field))) {
        return Err(ApiError::MissingFields("Missing required fields"));
    }

    let mut take = |field: &str| req.remove(field).unwrap_or(Value::Null);
    let ticket = NewTicket {
        student_id: take("student_id"),
        service: take("service"),
        priority: take("priority"),
        assigned_department: take("assigned_department"),
    };

    let id = state
        .store
        .with_connection(move |conn| insert_ticket(conn, &ticket))
        .await?;

    tracing::info!(ticket_id = id, "Ticket created");
    record_ticket_created();
    Ok((
        StatusCode::CREATED,
        MessageResponse::json("Ticket created successfully"),
    ))
}

/// Handle GET /ticket/all.
#[tracing::instrument(skip_all)]
pub async fn all_tickets(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let tickets = state
        .store
        .with_connection(|conn| list_tickets(conn))
        .await?;

    tracing::debug!(count = tickets.len(), "Tickets listed");
    Ok(Json(tickets))
}

/// Handle PUT /ticket/status/{ticket_id}.
///
/// The update is unconditional: an unknown id still answers 200.
#[tracing::instrument(skip_all, fields(ticket_id))]
pub async fn update_ticket_status(
    State(state): State<Arc<ServerState>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(segment) = path?;
    let ticket_id = parse_ticket_id(&segment).ok_or(ApiError::NotFound)?;
    tracing::Span::current().record("ticket_id", ticket_id);
    let Json(req) = body?;

    let status: TicketStatus = req
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or(ApiError::InvalidStatus)?;

    let matched = state
        .store
        .with_connection(move |conn| update_status(conn, ticket_id, status))
        .await?;

    if matched == 0 {
        tracing::debug!(%status, "No ticket matched status update");
    } else {
        tracing::info!(%status, "Ticket status updated");
    }
    record_status_update(status);
    Ok(MessageResponse::json("Ticket status updated"))
}
