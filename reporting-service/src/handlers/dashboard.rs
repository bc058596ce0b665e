use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::models::{CardSummary, LatestInvoice, RevenueRecord};
use crate::startup::AppState;

pub async fn revenue(State(state): State<AppState>) -> Result<Json<Vec<RevenueRecord>>, AppError> {
    Ok(Json(state.reporting.fetch_revenue().await?))
}

pub async fn latest_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<LatestInvoice>>, AppError> {
    Ok(Json(state.reporting.fetch_latest_invoices().await?))
}

pub async fn cards(State(state): State<AppState>) -> Result<Json<CardSummary>, AppError> {
    Ok(Json(state.reporting.fetch_card_summary().await?))
}
