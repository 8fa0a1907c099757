use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::ProviderCellState;

pub fn provider_routes(state: Arc<ProviderCellState>) -> Router {
    Router::new()
        .route("/search", get(handlers::search_providers))
        .route("/grouped", get(handlers::grouped_providers))
        .route("/category/{category}", get(handlers::providers_by_category))
        .route("/refresh", post(handlers::refresh_directory))
        .route("/{provider_id}", get(handlers::get_provider))
        .route(
            "/{provider_id}/slots",
            get(handlers::provider_slots).post(handlers::define_slots),
        )
        .with_state(state)
}
