use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use appointment_cell::AppointmentCellState;
use provider_cell::router::provider_routes;
use provider_cell::ProviderCellState;

pub fn create_router(
    provider_state: Arc<ProviderCellState>,
    appointment_state: Arc<AppointmentCellState>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Carebook API is running!" }))
        .nest("/providers", provider_routes(provider_state))
        .nest("/appointments", appointment_routes(appointment_state))
}
