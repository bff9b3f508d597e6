//! GST calculation engine (line items and invoice totals).
//!
//! This crate contains the tax arithmetic for Indian GST invoices
//! (CGST/IGST/UTGST split, tax-inclusive vs tax-exclusive pricing),
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod gst;

pub use gst::{
    calculate_invoice_totals, calculate_item_amount, round_half_up, InvoiceTotals, LineAmounts,
    TaxSettings, TaxedLine,
};
