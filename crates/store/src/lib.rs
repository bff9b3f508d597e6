//! Application state store and API-client seam.
//!
//! The rest of the workspace is pure domain logic; this crate holds the two
//! stateful pieces the application shell needs:
//!
//! - [`ApiClient`], the boundary behind which the real backend (HTTP + the
//!   document store) lives, with [`InMemoryApi`] as the test/dev backend;
//! - [`AppStore`], an explicit state store over an `ApiClient` that keeps the
//!   loaded clients/products/invoices/company and applies optimistic local
//!   updates after each successful call.
//!
//! The calculation engine never sees this state; it is only ever handed plain
//! values.

pub mod api;
pub mod in_memory;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use in_memory::InMemoryApi;
pub use store::AppStore;
