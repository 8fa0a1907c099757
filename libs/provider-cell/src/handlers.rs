// libs/provider-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{DefineSlotsRequest, ProviderProfileView};
use crate::ProviderCellState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub day: u8,
}

#[axum::debug_handler]
pub async fn search_providers(
    State(state): State<Arc<ProviderCellState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let providers = state.directory.search(query.q.as_deref().unwrap_or(""));

    let views: Vec<ProviderProfileView> = providers
        .iter()
        .map(ProviderProfileView::from_provider)
        .collect();
    let total = views.len();

    Ok(Json(json!({
        "providers": views,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn providers_by_category(
    State(state): State<Arc<ProviderCellState>>,
    Path(category): Path<String>,
) -> Result<Json<Value>, AppError> {
    let providers = state.directory.find_by_category(&category);

    let views: Vec<ProviderProfileView> = providers
        .iter()
        .map(ProviderProfileView::from_provider)
        .collect();
    let total = views.len();

    Ok(Json(json!({
        "category": category,
        "providers": views,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn grouped_providers(
    State(state): State<Arc<ProviderCellState>>,
) -> Result<Json<Value>, AppError> {
    let grouped = state.directory.grouped();

    let sections: Value = grouped
        .into_iter()
        .map(|(category, providers)| {
            let views: Vec<ProviderProfileView> = providers
                .iter()
                .map(ProviderProfileView::from_provider)
                .collect();
            (category, json!(views))
        })
        .collect::<serde_json::Map<String, Value>>()
        .into();

    Ok(Json(json!({ "sections": sections })))
}

#[axum::debug_handler]
pub async fn get_provider(
    State(state): State<Arc<ProviderCellState>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let provider = state
        .directory
        .get(provider_id)
        .ok_or_else(|| AppError::NotFound("Provider not found".to_string()))?;

    Ok(Json(json!(ProviderProfileView::from_provider(&provider))))
}

#[axum::debug_handler]
pub async fn provider_slots(
    State(state): State<Arc<ProviderCellState>>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Value>, AppError> {
    if state.directory.get(provider_id).is_none() {
        return Err(AppError::NotFound("Provider not found".to_string()));
    }

    let slots = state.calendar.slots_for(provider_id, query.day);
    let total = slots.len();

    Ok(Json(json!({
        "provider_id": provider_id,
        "day": query.day,
        "slots": slots,
        "total_slots": total
    })))
}

#[axum::debug_handler]
pub async fn define_slots(
    State(state): State<Arc<ProviderCellState>>,
    Path(provider_id): Path<Uuid>,
    Json(request): Json<DefineSlotsRequest>,
) -> Result<Json<Value>, AppError> {
    if state.directory.get(provider_id).is_none() {
        return Err(AppError::NotFound("Provider not found".to_string()));
    }

    let mut defined = Vec::new();
    for time in request.times {
        let slot = state.calendar.define_slot(provider_id, request.day, time)?;
        defined.push(slot);
    }

    Ok(Json(json!({
        "provider_id": provider_id,
        "day": request.day,
        "defined": defined
    })))
}

#[axum::debug_handler]
pub async fn refresh_directory(
    State(state): State<Arc<ProviderCellState>>,
) -> Result<Json<Value>, AppError> {
    let report = state.directory.load_from(state.source.as_ref()).await?;

    Ok(Json(json!(report)))
}
