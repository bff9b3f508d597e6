//! The API-client boundary the state store talks to.

use std::sync::Arc;

use thiserror::Error;

use gstbill_company::{CompanyPatch, CompanyProfile};
use gstbill_core::DomainError;
use gstbill_invoicing::{Invoice, InvoiceId, InvoicePatch};
use gstbill_parties::{Client, ClientDraft, ClientId, ClientPatch};
use gstbill_products::{Product, ProductDraft, ProductId, ProductPatch};

/// Backend operation error.
///
/// These are boundary failures (missing records, uniqueness conflicts,
/// rejected payloads, transport trouble) as opposed to in-process domain
/// errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed record does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness or concurrency conflict (e.g. duplicate invoice number).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The payload was rejected by validation.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The backend could not be reached or failed internally.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Everything the application needs from the backend.
///
/// The real implementation is an HTTP client in front of the document store;
/// that whole stack is out of scope here and hides behind this trait.
/// [`InMemoryApi`](crate::InMemoryApi) implements it for tests and local use.
///
/// Clients and products are created from drafts (the backend assigns ids);
/// invoices arrive as complete documents carrying a caller-generated id, the
/// way the editing flow builds them.
pub trait ApiClient: Send + Sync {
    fn list_clients(&self) -> Result<Vec<Client>, ApiError>;
    fn create_client(&self, draft: ClientDraft) -> Result<Client, ApiError>;
    fn update_client(&self, id: ClientId, patch: ClientPatch) -> Result<Client, ApiError>;
    fn delete_client(&self, id: ClientId) -> Result<(), ApiError>;

    fn list_products(&self) -> Result<Vec<Product>, ApiError>;
    fn create_product(&self, draft: ProductDraft) -> Result<Product, ApiError>;
    fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product, ApiError>;
    fn delete_product(&self, id: ProductId) -> Result<(), ApiError>;

    fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError>;
    fn create_invoice(&self, invoice: Invoice) -> Result<Invoice, ApiError>;
    fn update_invoice(&self, id: InvoiceId, patch: InvoicePatch) -> Result<Invoice, ApiError>;
    fn delete_invoice(&self, id: InvoiceId) -> Result<(), ApiError>;

    fn get_company(&self) -> Result<CompanyProfile, ApiError>;
    fn update_company(&self, patch: CompanyPatch) -> Result<CompanyProfile, ApiError>;

    /// Preview the next invoice number without reserving it.
    fn next_invoice_number(&self) -> Result<String, ApiError>;
}

impl<S> ApiClient for Arc<S>
where
    S: ApiClient + ?Sized,
{
    fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        (**self).list_clients()
    }

    fn create_client(&self, draft: ClientDraft) -> Result<Client, ApiError> {
        (**self).create_client(draft)
    }

    fn update_client(&self, id: ClientId, patch: ClientPatch) -> Result<Client, ApiError> {
        (**self).update_client(id, patch)
    }

    fn delete_client(&self, id: ClientId) -> Result<(), ApiError> {
        (**self).delete_client(id)
    }

    fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        (**self).list_products()
    }

    fn create_product(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        (**self).create_product(draft)
    }

    fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product, ApiError> {
        (**self).update_product(id, patch)
    }

    fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        (**self).delete_product(id)
    }

    fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        (**self).list_invoices()
    }

    fn create_invoice(&self, invoice: Invoice) -> Result<Invoice, ApiError> {
        (**self).create_invoice(invoice)
    }

    fn update_invoice(&self, id: InvoiceId, patch: InvoicePatch) -> Result<Invoice, ApiError> {
        (**self).update_invoice(id, patch)
    }

    fn delete_invoice(&self, id: InvoiceId) -> Result<(), ApiError> {
        (**self).delete_invoice(id)
    }

    fn get_company(&self) -> Result<CompanyProfile, ApiError> {
        (**self).get_company()
    }

    fn update_company(&self, patch: CompanyPatch) -> Result<CompanyProfile, ApiError> {
        (**self).update_company(patch)
    }

    fn next_invoice_number(&self) -> Result<String, ApiError> {
        (**self).next_invoice_number()
    }
}
