//! Services module for reporting-service.

pub mod database;
pub mod metrics;
pub mod reporting;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use reporting::{
    page_offset, search_pattern, total_pages, ReportingQueryService, ITEMS_PER_PAGE,
    LATEST_INVOICES_LIMIT,
};
