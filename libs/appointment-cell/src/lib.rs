pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

// Re-export all models and services for external use
pub use models::*;
pub use services::*;

use std::sync::Arc;

/// Shared state for the appointment cell routers.
pub struct AppointmentCellState {
    pub booking: Arc<services::booking::BookingService>,
    pub ledger: Arc<services::ledger::AppointmentLedger>,
}
