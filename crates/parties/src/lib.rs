//! Parties domain module (invoice clients).
//!
//! This crate contains the client records invoices are billed to, with the
//! normalization and validation rules the document store expects,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod client;

pub use client::{Client, ClientDraft, ClientId, ClientPatch};
