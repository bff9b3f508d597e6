//! In-memory backend implementing the API seam.

use std::sync::RwLock;

use gstbill_company::{CompanyId, CompanyPatch, CompanyProfile};
use gstbill_core::{DomainError, EntityId};
use gstbill_invoicing::{Invoice, InvoiceId, InvoicePatch};
use gstbill_parties::{Client, ClientDraft, ClientId, ClientPatch};
use gstbill_products::{Product, ProductDraft, ProductId, ProductPatch};

use crate::api::{ApiClient, ApiError};

#[derive(Debug)]
struct State {
    clients: Vec<Client>,
    products: Vec<Product>,
    invoices: Vec<Invoice>,
    company: CompanyProfile,
}

/// In-memory document store behind the [`ApiClient`] trait.
///
/// Intended for tests/dev. Enforces the same rules the real backend does:
/// invoice numbers are unique, invoices must reference an existing client,
/// and issuing an invoice advances the company's numbering counter.
#[derive(Debug)]
pub struct InMemoryApi {
    state: RwLock<State>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                clients: Vec::new(),
                products: Vec::new(),
                invoices: Vec::new(),
                company: CompanyProfile::new(CompanyId::new(EntityId::new())),
            }),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, ApiError> {
        self.state
            .read()
            .map_err(|_| ApiError::Transport("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, ApiError> {
        self.state
            .write()
            .map_err(|_| ApiError::Transport("lock poisoned".to_string()))
    }
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient for InMemoryApi {
    fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        let state = self.read()?;
        let mut clients = state.clients.clone();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    fn create_client(&self, draft: ClientDraft) -> Result<Client, ApiError> {
        let mut state = self.write()?;
        let client = Client::new(ClientId::new(EntityId::new()), draft)?;
        state.clients.push(client.clone());
        Ok(client)
    }

    fn update_client(&self, id: ClientId, patch: ClientPatch) -> Result<Client, ApiError> {
        let mut state = self.write()?;
        let client = state
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ApiError::NotFound)?;
        client.apply(patch)?;
        Ok(client.clone())
    }

    fn delete_client(&self, id: ClientId) -> Result<(), ApiError> {
        let mut state = self.write()?;
        let before = state.clients.len();
        state.clients.retain(|c| c.id != id);
        if state.clients.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let state = self.read()?;
        let mut products = state.products.clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    fn create_product(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        let mut state = self.write()?;
        let product = Product::new(ProductId::new(EntityId::new()), draft)?;
        state.products.push(product.clone());
        Ok(product)
    }

    fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product, ApiError> {
        let mut state = self.write()?;
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ApiError::NotFound)?;
        product.apply(patch)?;
        Ok(product.clone())
    }

    fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let mut state = self.write()?;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        let state = self.read()?;
        let mut invoices = state.invoices.clone();
        // Newest first, number as tie-breaker.
        invoices.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.invoice_number.cmp(&a.invoice_number))
        });
        Ok(invoices)
    }

    fn create_invoice(&self, invoice: Invoice) -> Result<Invoice, ApiError> {
        let mut state = self.write()?;

        invoice.validate()?;

        if !state.clients.iter().any(|c| c.id == invoice.client_id) {
            return Err(ApiError::Validation(DomainError::validation(
                "invalid client",
            )));
        }
        if state.invoices.iter().any(|i| i.id == invoice.id) {
            return Err(ApiError::Conflict("invoice already exists".to_string()));
        }
        if state
            .invoices
            .iter()
            .any(|i| i.invoice_number == invoice.invoice_number)
        {
            return Err(ApiError::Conflict(
                "invoice with same invoice number already exists".to_string(),
            ));
        }

        state.company.invoice_settings.record_issued();
        state.invoices.push(invoice.clone());
        Ok(invoice)
    }

    fn update_invoice(&self, id: InvoiceId, patch: InvoicePatch) -> Result<Invoice, ApiError> {
        let mut state = self.write()?;

        if let Some(number) = &patch.invoice_number {
            let number = number.trim();
            if state
                .invoices
                .iter()
                .any(|i| i.id != id && i.invoice_number == number)
            {
                return Err(ApiError::Conflict(
                    "invoice with same invoice number already exists".to_string(),
                ));
            }
        }

        let stored = state
            .invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ApiError::NotFound)?;

        // Apply to a copy so a rejected patch leaves the document untouched.
        let mut updated = stored.clone();
        updated.apply(patch)?;
        updated.validate()?;
        *stored = updated.clone();
        Ok(updated)
    }

    fn delete_invoice(&self, id: InvoiceId) -> Result<(), ApiError> {
        let mut state = self.write()?;
        let before = state.invoices.len();
        state.invoices.retain(|i| i.id != id);
        if state.invoices.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    fn get_company(&self) -> Result<CompanyProfile, ApiError> {
        Ok(self.read()?.company.clone())
    }

    fn update_company(&self, patch: CompanyPatch) -> Result<CompanyProfile, ApiError> {
        let mut state = self.write()?;
        state.company.apply(patch)?;
        Ok(state.company.clone())
    }

    fn next_invoice_number(&self) -> Result<String, ApiError> {
        Ok(self.read()?.company.invoice_settings.next_invoice_number())
    }
}
