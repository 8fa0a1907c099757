// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    AppointmentSearchQuery, AppointmentStatus, BookAppointmentRequest,
    RescheduleAppointmentRequest, TransitionRequest,
};
use crate::AppointmentCellState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub consumer_id: Option<String>,
    pub provider_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.booking.book(request)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.ledger.get(appointment_id)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppointmentCellState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.ledger.search(&AppointmentSearchQuery {
        consumer_id: query.consumer_id,
        provider_id: query.provider_id,
        status: query.status,
    });
    let total = appointments.len();

    Ok(Json(json!({
        "appointments": appointments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn transition_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.ledger.transition(appointment_id, request.new_status)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.booking.reschedule(appointment_id, request)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppointmentCellState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.booking.cancel(appointment_id)?;

    Ok(Json(json!(appointment)))
}
