use axum::{
    extract::{Query, State},
    Json,
};
use service_core::error::AppError;

use super::SearchParams;
use crate::models::{CustomerField, CustomerSummary};
use crate::startup::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerField>>, AppError> {
    Ok(Json(state.reporting.fetch_all_customers().await?))
}

pub async fn table(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    Ok(Json(
        state
            .reporting
            .fetch_filtered_customers(&params.query)
            .await?,
    ))
}
