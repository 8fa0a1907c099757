pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

// Re-export all models and services for external use
pub use models::*;
pub use services::*;

use std::sync::Arc;

/// Shared state for the provider cell routers.
pub struct ProviderCellState {
    pub directory: Arc<services::directory::ProviderDirectory>,
    pub calendar: Arc<services::availability::AvailabilityCalendar>,
    pub source: Arc<dyn services::source::ProviderSource>,
}
