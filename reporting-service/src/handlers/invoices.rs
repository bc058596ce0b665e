use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use uuid::Uuid;

use super::SearchParams;
use crate::models::{InvoiceForm, InvoiceSearchResult};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct InvoiceListParams {
    #[serde(default)]
    pub query: String,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageCountResponse {
    pub total_pages: i64,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<InvoiceListParams>,
) -> Result<Json<Vec<InvoiceSearchResult>>, AppError> {
    if params.page == 0 {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "page must be 1 or greater"
        )));
    }

    let invoices = state
        .reporting
        .fetch_filtered_invoices(&params.query, params.page)
        .await?;

    Ok(Json(invoices))
}

pub async fn page_count(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PageCountResponse>, AppError> {
    let total_pages = state
        .reporting
        .fetch_invoice_page_count(&params.query)
        .await?;

    Ok(Json(PageCountResponse { total_pages }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<InvoiceForm>, AppError> {
    state
        .reporting
        .fetch_invoice_by_id(invoice_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))
}
