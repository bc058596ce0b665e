//! Domain models for reporting-service.

mod customer;
mod invoice;
mod revenue;
mod summary;

pub use customer::{CustomerField, CustomerSummary, CustomerSummaryRow};
pub use invoice::{
    InvoiceForm, InvoiceFormRow, InvoiceSearchResult, InvoiceStatus, LatestInvoice,
    LatestInvoiceRow,
};
pub use revenue::RevenueRecord;
pub use summary::CardSummary;
