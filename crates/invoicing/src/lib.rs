//! Invoicing domain module.
//!
//! This crate contains the invoice document model: line items whose derived
//! amounts are written by the tax engine, recompute-on-change semantics for
//! edits, validation, and invoice statistics. Implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod invoice;
pub mod stats;

pub use invoice::{
    Invoice, InvoiceId, InvoiceItem, InvoicePatch, InvoiceStatus, ItemPatch, DEFAULT_TERMS,
};
pub use stats::{invoice_stats, InvoiceStats, MonthlyStats, OverallStats};
