//! Products domain module (the billable catalog).
//!
//! This crate contains the product records invoice lines are filled from,
//! including the numeric guards on rates and tax rates, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductDraft, ProductId, ProductPatch};
