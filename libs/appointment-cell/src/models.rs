// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveTime, Utc};
use std::fmt;

use provider_cell::models::CalendarError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub consumer_id: String,
    pub day: u8,
    pub time: NaiveTime,
    pub specialty: String,
    pub session_type: SessionType,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Unconfirmed,
    Scheduled,
    Rescheduled,
    Cancelled,
}

impl AppointmentStatus {
    /// Terminal statuses have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Unconfirmed => write!(f, "unconfirmed"),
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Rescheduled => write!(f, "rescheduled"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    InPerson,
    AudioCall,
    VideoSession,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionType::InPerson => write!(f, "in_person"),
            SessionType::AudioCall => write!(f, "audio_call"),
            SessionType::VideoSession => write!(f, "video_session"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub provider_id: Uuid,
    pub day: u8,
    pub time: NaiveTime,
    pub consumer_id: String,
    pub specialty: String,
    pub session_type: SessionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub new_day: u8,
    pub new_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub new_status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    pub consumer_id: Option<String>,
    pub provider_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("Provider not found")]
    ProviderNotFound,

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Slot not available")]
    SlotUnavailable,

    #[error("Provider does not offer specialty: {specialty}")]
    SpecialtyNotOffered { specialty: String },

    #[error("Slot does not match the appointment's provider or is not reserved")]
    SlotMismatch,

    #[error("Appointment cannot transition out of status: {0}")]
    IllegalTransition(AppointmentStatus),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<CalendarError> for BookingError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::SlotUnavailable => BookingError::SlotUnavailable,
            CalendarError::InvalidState(msg) => BookingError::InvalidState(msg),
            CalendarError::DuplicateSlot { day, time } => {
                BookingError::InvalidState(format!("duplicate slot on day {} at {}", day, time))
            }
            CalendarError::InvalidDay(day) => {
                BookingError::InvalidState(format!("invalid calendar day {}", day))
            }
        }
    }
}

impl From<BookingError> for shared_models::error::AppError {
    fn from(err: BookingError) -> Self {
        use shared_models::error::AppError;
        match &err {
            BookingError::ProviderNotFound | BookingError::AppointmentNotFound => {
                AppError::NotFound(err.to_string())
            }
            BookingError::SpecialtyNotOffered { .. } => AppError::ValidationError(err.to_string()),
            BookingError::SlotUnavailable
            | BookingError::SlotMismatch
            | BookingError::IllegalTransition(_)
            | BookingError::InvalidState(_) => AppError::Conflict(err.to_string()),
        }
    }
}
