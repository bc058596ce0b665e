//! Read-only reporting queries behind the invoicing dashboard.

use crate::error::DataAccessError;
use crate::models::{
    CardSummary, CustomerField, CustomerSummary, CustomerSummaryRow, InvoiceForm, InvoiceFormRow,
    InvoiceSearchResult, InvoiceStatus, LatestInvoice, LatestInvoiceRow, RevenueRecord,
};
use crate::services::database::Database;
use crate::services::metrics::{record_query, DB_QUERY_DURATION};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Rows per page of the invoices table.
pub const ITEMS_PER_PAGE: i64 = 6;

/// Rows shown in the latest-invoices widget.
pub const LATEST_INVOICES_LIMIT: i64 = 5;

// Invoice search predicate for both the page and page-count queries.
// `$1` is the ILIKE pattern from `search_pattern`.
macro_rules! invoice_search_predicate {
    () => {
        r#"
            customer.name ILIKE $1 OR
            customer.email ILIKE $1 OR
            invoice.amount::text ILIKE $1 OR
            invoice.date::text ILIKE $1 OR
            invoice.status ILIKE $1
        "#
    };
}

/// Row offset of a 1-based page. Page 0 is treated as page 1.
pub fn page_offset(page: u32) -> i64 {
    (i64::from(page.max(1)) - 1) * ITEMS_PER_PAGE
}

/// Number of pages needed for `count` rows.
pub fn total_pages(count: i64) -> i64 {
    if count <= 0 {
        0
    } else {
        (count + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
    }
}

/// ILIKE pattern matching `query` as a literal substring.
pub fn search_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Time a query, record its outcome, and sanitize its error.
async fn run_query<T, F>(
    operation: &'static str,
    message: &'static str,
    query: F,
) -> Result<T, DataAccessError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let timer = DB_QUERY_DURATION
        .with_label_values(&[operation])
        .start_timer();

    let result = query
        .await
        .map_err(DataAccessError::wrap(operation, message));

    timer.observe_duration();
    record_query(operation, &result);

    result
}

/// Query service for the dashboard, invoices and customers pages.
#[derive(Clone)]
pub struct ReportingQueryService {
    db: Arc<Database>,
}

impl ReportingQueryService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// All revenue rows, in storage order.
    #[instrument(skip(self))]
    pub async fn fetch_revenue(&self) -> Result<Vec<RevenueRecord>, DataAccessError> {
        let revenue = run_query(
            "fetch_revenue",
            "Failed to fetch revenue data.",
            sqlx::query_as::<_, RevenueRecord>("SELECT month, revenue FROM revenue")
                .fetch_all(self.db.pool()),
        )
        .await?;

        debug!(rows = revenue.len(), "Revenue fetched");

        Ok(revenue)
    }

    /// The five most recent invoices with their customer, amounts formatted.
    #[instrument(skip(self))]
    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, DataAccessError> {
        let rows = run_query(
            "fetch_latest_invoices",
            "Failed to fetch the latest invoices.",
            sqlx::query_as::<_, LatestInvoiceRow>(
                r#"
                SELECT invoice.amount, customer.name, customer.image_url, customer.email, invoice.id
                FROM invoice
                JOIN customer ON invoice.customer_id = customer.id
                ORDER BY invoice.date DESC, invoice.id
                LIMIT $1
                "#,
            )
            .bind(LATEST_INVOICES_LIMIT)
            .fetch_all(self.db.pool()),
        )
        .await?;

        Ok(rows.into_iter().map(LatestInvoice::from).collect())
    }

    /// Invoice count, customer count and paid/pending totals.
    ///
    /// The three aggregates are independent and run concurrently; any failure
    /// fails the whole summary.
    #[instrument(skip(self))]
    pub async fn fetch_card_summary(&self) -> Result<CardSummary, DataAccessError> {
        let pool = self.db.pool();

        let invoice_count =
            sqlx::query_scalar::<_, Option<i64>>("SELECT COUNT(*) FROM invoice").fetch_one(pool);
        let customer_count =
            sqlx::query_scalar::<_, Option<i64>>("SELECT COUNT(*) FROM customer").fetch_one(pool);
        let status_totals = sqlx::query_as::<_, (Option<i64>, Option<i64>)>(
            r#"
            SELECT
                SUM(CASE WHEN status = $1 THEN amount ELSE 0 END) AS paid,
                SUM(CASE WHEN status = $2 THEN amount ELSE 0 END) AS pending
            FROM invoice
            "#,
        )
        .bind(InvoiceStatus::Paid.as_str())
        .bind(InvoiceStatus::Pending.as_str())
        .fetch_one(pool);

        let (invoices, customers, (paid, pending)) = run_query(
            "fetch_card_summary",
            "Failed to fetch card data.",
            async { tokio::try_join!(invoice_count, customer_count, status_totals) },
        )
        .await?;

        Ok(CardSummary::from_aggregates(invoices, customers, paid, pending))
    }

    /// One page of invoices whose customer name, email, amount, date or
    /// status contains `query` (case-insensitive), newest first.
    #[instrument(skip(self))]
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<InvoiceSearchResult>, DataAccessError> {
        let invoices = run_query(
            "fetch_filtered_invoices",
            "Failed to fetch invoices.",
            sqlx::query_as::<_, InvoiceSearchResult>(concat!(
                r#"
                SELECT
                    invoice.id,
                    invoice.customer_id,
                    invoice.amount,
                    invoice.date,
                    invoice.status,
                    customer.name,
                    customer.email,
                    customer.image_url
                FROM invoice
                JOIN customer ON invoice.customer_id = customer.id
                WHERE
                "#,
                invoice_search_predicate!(),
                r#"
                ORDER BY invoice.date DESC, invoice.id
                LIMIT $2 OFFSET $3
                "#,
            ))
            .bind(search_pattern(query))
            .bind(ITEMS_PER_PAGE)
            .bind(page_offset(page))
            .fetch_all(self.db.pool()),
        )
        .await?;

        debug!(rows = invoices.len(), "Filtered invoices fetched");

        Ok(invoices)
    }

    /// Number of invoice pages matching `query`.
    #[instrument(skip(self))]
    pub async fn fetch_invoice_page_count(&self, query: &str) -> Result<i64, DataAccessError> {
        let count = run_query(
            "fetch_invoice_page_count",
            "Failed to fetch total number of invoices.",
            sqlx::query_scalar::<_, i64>(concat!(
                r#"
                SELECT COUNT(*)
                FROM invoice
                JOIN customer ON invoice.customer_id = customer.id
                WHERE
                "#,
                invoice_search_predicate!(),
            ))
            .bind(search_pattern(query))
            .fetch_one(self.db.pool()),
        )
        .await?;

        Ok(total_pages(count))
    }

    /// A single invoice for the edit form, or `None` if no invoice has `invoice_id`.
    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    pub async fn fetch_invoice_by_id(
        &self,
        invoice_id: Uuid,
    ) -> Result<Option<InvoiceForm>, DataAccessError> {
        let row = run_query(
            "fetch_invoice_by_id",
            "Failed to fetch invoice.",
            sqlx::query_as::<_, InvoiceFormRow>(
                r#"
                SELECT invoice.id, invoice.customer_id, invoice.amount, invoice.status
                FROM invoice
                WHERE invoice.id = $1
                "#,
            )
            .bind(invoice_id)
            .fetch_optional(self.db.pool()),
        )
        .await?;

        Ok(row.map(InvoiceForm::from))
    }

    /// Every customer's id and name, alphabetical.
    #[instrument(skip(self))]
    pub async fn fetch_all_customers(&self) -> Result<Vec<CustomerField>, DataAccessError> {
        run_query(
            "fetch_all_customers",
            "Failed to fetch all customers.",
            sqlx::query_as::<_, CustomerField>(
                r#"
                SELECT id, name
                FROM customer
                ORDER BY name ASC
                "#,
            )
            .fetch_all(self.db.pool()),
        )
        .await
    }

    /// Customers whose name or email contains `query`, with invoice count and
    /// formatted pending/paid totals. Customers without invoices are included.
    #[instrument(skip(self))]
    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
    ) -> Result<Vec<CustomerSummary>, DataAccessError> {
        let rows = run_query(
            "fetch_filtered_customers",
            "Failed to fetch customer table.",
            sqlx::query_as::<_, CustomerSummaryRow>(
                r#"
                SELECT
                    customer.id,
                    customer.name,
                    customer.email,
                    customer.image_url,
                    COUNT(invoice.id) AS total_invoices,
                    SUM(CASE WHEN invoice.status = $2 THEN invoice.amount ELSE 0 END) AS total_pending,
                    SUM(CASE WHEN invoice.status = $3 THEN invoice.amount ELSE 0 END) AS total_paid
                FROM customer
                LEFT JOIN invoice ON customer.id = invoice.customer_id
                WHERE
                    customer.name ILIKE $1 OR
                    customer.email ILIKE $1
                GROUP BY customer.id, customer.name, customer.email, customer.image_url
                ORDER BY customer.name ASC
                "#,
            )
            .bind(search_pattern(query))
            .bind(InvoiceStatus::Pending.as_str())
            .bind(InvoiceStatus::Paid.as_str())
            .fetch_all(self.db.pool()),
        )
        .await?;

        debug!(rows = rows.len(), "Filtered customers fetched");

        Ok(rows.into_iter().map(CustomerSummary::from).collect())
    }
}
