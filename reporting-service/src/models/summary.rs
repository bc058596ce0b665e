//! Dashboard card summary.

use crate::utils::format_currency;
use serde::{Deserialize, Serialize};

/// Headline numbers shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub number_of_customers: i64,
    pub number_of_invoices: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

impl CardSummary {
    /// Combine the raw aggregates. Missing aggregates (no rows) count as zero.
    pub fn from_aggregates(
        invoice_count: Option<i64>,
        customer_count: Option<i64>,
        paid_cents: Option<i64>,
        pending_cents: Option<i64>,
    ) -> Self {
        Self {
            number_of_customers: customer_count.unwrap_or(0),
            number_of_invoices: invoice_count.unwrap_or(0),
            total_paid_invoices: format_currency(paid_cents.unwrap_or(0)),
            total_pending_invoices: format_currency(pending_cents.unwrap_or(0)),
        }
    }
}
