//! HTTP handlers exposing the reporting queries as JSON.

pub mod customers;
pub mod dashboard;
pub mod health;
pub mod invoices;

use serde::Deserialize;

/// `?query=` parameter shared by the search endpoints. Missing means "match all".
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}
