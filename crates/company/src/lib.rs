//! Company domain module (seller profile, bank details, invoice numbering).
//!
//! One company profile exists per account; invoices embed a snapshot of it at
//! issue time. Implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod company;

pub use company::{
    BankDetails, CompanyId, CompanyInfo, CompanyPatch, CompanyProfile, InvoiceSettings,
};
