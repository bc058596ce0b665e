//! Formatting helpers.

pub mod currency;

pub use currency::{cents_to_decimal, format_currency};
