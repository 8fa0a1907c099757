// libs/provider-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::NaiveTime;
use std::fmt;

// ==============================================================================
// PROVIDER DIRECTORY MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub display_name: String,
    pub category: String,
    pub role: DirectoryRole,
    pub specialties: Vec<String>,
    pub fee: Option<f64>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub location: Option<String>,
    pub years_experience: Option<u32>,
}

impl Provider {
    /// Case-insensitive check against the provider's offered specialties.
    pub fn offers_specialty(&self, specialty: &str) -> bool {
        self.specialties
            .iter()
            .any(|s| s.eq_ignore_ascii_case(specialty))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryRole {
    Provider,
    Consumer,
    Staff,
}

impl fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryRole::Provider => write!(f, "provider"),
            DirectoryRole::Consumer => write!(f, "consumer"),
            DirectoryRole::Staff => write!(f, "staff"),
        }
    }
}

/// Boundary-only display view. Fallbacks for absent optional fields live here
/// and are never written back into the directory.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderProfileView {
    pub id: Uuid,
    pub display_name: String,
    pub category: String,
    pub specialties: Vec<String>,
    pub display_rating: String,
    pub display_experience: String,
    pub display_fee: String,
    pub review_count: u32,
    pub location: String,
}

impl ProviderProfileView {
    pub fn from_provider(provider: &Provider) -> Self {
        Self {
            id: provider.id,
            display_name: provider.display_name.clone(),
            category: provider.category.clone(),
            specialties: provider.specialties.clone(),
            display_rating: provider
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "4.5".to_string()),
            display_experience: provider
                .years_experience
                .map(|y| format!("{} years", y))
                .unwrap_or_else(|| "5+ years".to_string()),
            display_fee: provider
                .fee
                .map(|f| format!("${:.2}", f))
                .unwrap_or_else(|| "Fee on request".to_string()),
            review_count: provider.review_count.unwrap_or(0),
            location: provider
                .location
                .clone()
                .unwrap_or_else(|| "Remote".to_string()),
        }
    }
}

// ==============================================================================
// AVAILABILITY CALENDAR MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Open,
    Reserved,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Open => write!(f, "open"),
            SlotStatus::Reserved => write!(f, "reserved"),
        }
    }
}

/// Snapshot of a single bookable (day, time) opportunity for a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilitySlot {
    pub provider_id: Uuid,
    pub day: u8,
    pub time: NaiveTime,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefineSlotsRequest {
    pub day: u8,
    pub times: Vec<NaiveTime>,
}

// ==============================================================================
// INGESTION MODELS
// ==============================================================================

/// Raw record shape coming off the schemaless directory source. Everything is
/// optional here; validation decides what becomes a `Provider`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProviderRecord {
    pub id: Option<Uuid>,
    pub display_name: Option<String>,
    pub category: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub fee: Option<f64>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub location: Option<String>,
    pub years_experience: Option<u32>,
}

/// Outcome of one wholesale directory load.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub loaded: usize,
    pub quarantined: usize,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum CalendarError {
    #[error("Slot not available")]
    SlotUnavailable,

    #[error("Invalid slot state: {0}")]
    InvalidState(String),

    #[error("Duplicate slot for day {day} at {time}")]
    DuplicateSlot { day: u8, time: NaiveTime },

    #[error("Invalid calendar day: {0}")]
    InvalidDay(u8),
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Directory source request failed: {0}")]
    Http(String),

    #[error("Directory source returned a malformed payload: {0}")]
    MalformedPayload(String),
}

impl From<CalendarError> for shared_models::error::AppError {
    fn from(err: CalendarError) -> Self {
        use shared_models::error::AppError;
        match &err {
            CalendarError::SlotUnavailable => AppError::Conflict(err.to_string()),
            CalendarError::InvalidState(_) => AppError::Conflict(err.to_string()),
            CalendarError::DuplicateSlot { .. } => AppError::Conflict(err.to_string()),
            CalendarError::InvalidDay(_) => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<SourceError> for shared_models::error::AppError {
    fn from(err: SourceError) -> Self {
        shared_models::error::AppError::ExternalService(err.to_string())
    }
}
