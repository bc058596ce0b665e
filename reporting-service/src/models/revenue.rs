//! Revenue model for reporting-service.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Pre-aggregated revenue for one reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RevenueRecord {
    pub month: String,
    pub revenue: i32,
}
