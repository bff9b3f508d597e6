//! Explicit application state store over the API seam.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use gstbill_company::{CompanyPatch, CompanyProfile};
use gstbill_invoicing::{invoice_stats, Invoice, InvoiceId, InvoicePatch, InvoiceStats};
use gstbill_parties::{Client, ClientDraft, ClientId, ClientPatch};
use gstbill_products::{Product, ProductDraft, ProductId, ProductPatch};

use crate::api::{ApiClient, ApiError};

/// Holds the loaded domain records and keeps them in sync with the backend.
///
/// Every mutation calls the backend first and applies the returned record to
/// local state only on success, so the local copy optimistically mirrors what
/// the backend persisted. Failures are logged and propagated; local state is
/// never touched on a failed call.
///
/// The calculation engine operates purely on values passed through it and
/// never reads this state.
pub struct AppStore {
    api: Arc<dyn ApiClient>,
    clients: Vec<Client>,
    products: Vec<Product>,
    invoices: Vec<Invoice>,
    company: CompanyProfile,
}

impl AppStore {
    /// Fetch all collections up front and build the store.
    pub fn load(api: Arc<dyn ApiClient>) -> Result<Self, ApiError> {
        let clients = api.list_clients()?;
        let products = api.list_products()?;
        let invoices = api.list_invoices()?;
        let company = api.get_company()?;

        tracing::debug!(
            clients = clients.len(),
            products = products.len(),
            invoices = invoices.len(),
            "store loaded"
        );

        Ok(Self {
            api,
            clients,
            products,
            invoices,
            company,
        })
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    pub fn add_client(&mut self, draft: ClientDraft) -> Result<Client, ApiError> {
        let client = self.api.create_client(draft).map_err(|err| {
            tracing::error!("failed to add client: {err}");
            err
        })?;
        self.clients.push(client.clone());
        Ok(client)
    }

    pub fn update_client(&mut self, id: ClientId, patch: ClientPatch) -> Result<Client, ApiError> {
        let updated = self.api.update_client(id, patch).map_err(|err| {
            tracing::error!("failed to update client: {err}");
            err
        })?;
        if let Some(client) = self.clients.iter_mut().find(|c| c.id == id) {
            *client = updated.clone();
        }
        Ok(updated)
    }

    pub fn delete_client(&mut self, id: ClientId) -> Result<(), ApiError> {
        self.api.delete_client(id).map_err(|err| {
            tracing::error!("failed to delete client: {err}");
            err
        })?;
        self.clients.retain(|c| c.id != id);
        Ok(())
    }

    pub fn add_product(&mut self, draft: ProductDraft) -> Result<Product, ApiError> {
        let product = self.api.create_product(draft).map_err(|err| {
            tracing::error!("failed to add product: {err}");
            err
        })?;
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn update_product(
        &mut self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ApiError> {
        let updated = self.api.update_product(id, patch).map_err(|err| {
            tracing::error!("failed to update product: {err}");
            err
        })?;
        if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
            *product = updated.clone();
        }
        Ok(updated)
    }

    pub fn delete_product(&mut self, id: ProductId) -> Result<(), ApiError> {
        self.api.delete_product(id).map_err(|err| {
            tracing::error!("failed to delete product: {err}");
            err
        })?;
        self.products.retain(|p| p.id != id);
        Ok(())
    }

    pub fn save_invoice(&mut self, invoice: Invoice) -> Result<Invoice, ApiError> {
        let saved = self.api.create_invoice(invoice).map_err(|err| {
            tracing::error!("failed to save invoice: {err}");
            err
        })?;
        self.invoices.push(saved.clone());
        // Issuing advanced the backend's numbering counter; refresh our copy.
        self.company = self.api.get_company()?;
        Ok(saved)
    }

    pub fn update_invoice(
        &mut self,
        id: InvoiceId,
        patch: InvoicePatch,
    ) -> Result<Invoice, ApiError> {
        let updated = self.api.update_invoice(id, patch).map_err(|err| {
            tracing::error!("failed to update invoice: {err}");
            err
        })?;
        if let Some(invoice) = self.invoices.iter_mut().find(|i| i.id == id) {
            *invoice = updated.clone();
        }
        Ok(updated)
    }

    pub fn delete_invoice(&mut self, id: InvoiceId) -> Result<(), ApiError> {
        self.api.delete_invoice(id).map_err(|err| {
            tracing::error!("failed to delete invoice: {err}");
            err
        })?;
        self.invoices.retain(|i| i.id != id);
        Ok(())
    }

    pub fn update_company(&mut self, patch: CompanyPatch) -> Result<(), ApiError> {
        let updated = self.api.update_company(patch).map_err(|err| {
            tracing::error!("failed to update company info: {err}");
            err
        })?;
        self.company = updated;
        Ok(())
    }

    /// Preview the next invoice number from the backend.
    pub fn next_invoice_number(&self) -> Result<String, ApiError> {
        self.api.next_invoice_number()
    }

    /// Dashboard statistics over the currently loaded invoices.
    pub fn stats(&self, now: DateTime<Utc>) -> InvoiceStats {
        invoice_stats(&self.invoices, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryApi;

    use gstbill_core::EntityId;
    use gstbill_invoicing::{InvoiceItem, InvoiceStatus};
    use gstbill_tax::TaxSettings;

    fn loaded_store() -> AppStore {
        AppStore::load(Arc::new(InMemoryApi::new())).unwrap()
    }

    fn igst_only() -> TaxSettings {
        TaxSettings {
            show_cgst: false,
            show_igst: true,
            show_utgst: false,
            tax_included: false,
        }
    }

    fn draft_invoice(store: &AppStore, client_id: ClientId, product: &Product) -> Invoice {
        let settings = igst_only();
        let mut invoice = Invoice::new(
            InvoiceId::new(EntityId::new()),
            store.next_invoice_number().unwrap(),
            Utc::now(),
            client_id,
            store.company().info(),
            store.company().bank_details.clone(),
            settings,
        );
        invoice.add_item(InvoiceItem::from_product(product, 10.0, &settings));
        invoice
    }

    #[test]
    fn load_starts_empty_with_default_company() {
        let store = loaded_store();
        assert!(store.clients().is_empty());
        assert!(store.products().is_empty());
        assert!(store.invoices().is_empty());
        assert_eq!(store.company().name, "Company Name");
    }

    #[test]
    fn mutations_apply_optimistic_local_updates() {
        let mut store = loaded_store();

        let client = store
            .add_client(ClientDraft {
                name: "Sharma Traders".to_string(),
                ..ClientDraft::default()
            })
            .unwrap();
        assert_eq!(store.clients().len(), 1);

        store
            .update_client(
                client.id,
                ClientPatch {
                    phone: Some("98765 43210".to_string()),
                    ..ClientPatch::default()
                },
            )
            .unwrap();
        assert_eq!(store.clients()[0].phone, "98765 43210");

        store.delete_client(client.id).unwrap();
        assert!(store.clients().is_empty());
    }

    #[test]
    fn failed_mutation_leaves_local_state_untouched() {
        let mut store = loaded_store();
        let err = store
            .add_client(ClientDraft {
                name: "  ".to_string(),
                ..ClientDraft::default()
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.clients().is_empty());
    }

    #[test]
    fn saving_an_invoice_refreshes_the_numbering_counter() {
        let mut store = loaded_store();
        let client = store
            .add_client(ClientDraft {
                name: "Sharma Traders".to_string(),
                ..ClientDraft::default()
            })
            .unwrap();
        let product = store
            .add_product(ProductDraft {
                name: "Copper Wire 2.5mm".to_string(),
                hsn_code: "8544".to_string(),
                unit: "mtr".to_string(),
                rate: 100.0,
                tax_rate: 18.0,
                description: String::new(),
            })
            .unwrap();

        assert_eq!(store.next_invoice_number().unwrap(), "INV-0001");
        let invoice = draft_invoice(&store, client.id, &product);
        let saved = store.save_invoice(invoice).unwrap();

        assert_eq!(saved.grand_total, 1180.00);
        assert_eq!(store.invoices().len(), 1);
        assert_eq!(store.company().invoice_settings.current_number, 1);
        assert_eq!(store.next_invoice_number().unwrap(), "INV-0002");
    }

    #[test]
    fn stats_reflect_status_updates() {
        let mut store = loaded_store();
        let client = store
            .add_client(ClientDraft {
                name: "Sharma Traders".to_string(),
                ..ClientDraft::default()
            })
            .unwrap();
        let product = store
            .add_product(ProductDraft {
                name: "Copper Wire 2.5mm".to_string(),
                hsn_code: "8544".to_string(),
                unit: "mtr".to_string(),
                rate: 100.0,
                tax_rate: 18.0,
                description: String::new(),
            })
            .unwrap();

        let invoice = draft_invoice(&store, client.id, &product);
        let saved = store.save_invoice(invoice).unwrap();

        let now = Utc::now();
        let stats = store.stats(now);
        assert_eq!(stats.total.total_invoices, 1);
        assert_eq!(stats.total.pending_amount, 1180.00);
        assert_eq!(stats.total.paid_amount, 0.0);

        store
            .update_invoice(
                saved.id,
                InvoicePatch {
                    status: Some(InvoiceStatus::Paid),
                    ..InvoicePatch::default()
                },
            )
            .unwrap();

        let stats = store.stats(now);
        assert_eq!(stats.total.paid_amount, 1180.00);
        assert_eq!(stats.total.pending_amount, 0.0);
        assert_eq!(stats.monthly.monthly_invoices, 1);
    }
}
