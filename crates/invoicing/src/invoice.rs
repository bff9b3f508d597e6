use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gstbill_company::{BankDetails, CompanyInfo};
use gstbill_core::{DomainError, DomainResult, EntityId};
use gstbill_parties::ClientId;
use gstbill_products::{Product, ProductId};
use gstbill_tax::{calculate_invoice_totals, calculate_item_amount, TaxSettings, TaxedLine};

/// Invoice identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub EntityId);

impl InvoiceId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

/// Default terms printed on new invoices.
pub const DEFAULT_TERMS: &str = "1. Goods once accepted will not be taken back.\n2. If payment is not made within 15 days, Interest @ 18% will be charged extra.\n3. All disputes subject to Chandigarh Jurisdiction.";

/// One invoice line.
///
/// `quantity`, `rate` and `tax_rate` are the editable inputs; `amount` and
/// the three tax components are derived by the calculation engine and are
/// never hand-edited — every mutation path recalculates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(rename = "productId")]
    pub product_id: Option<ProductId>,
    pub particulars: String,
    #[serde(rename = "hsnCode")]
    pub hsn_code: String,
    pub quantity: f64,
    pub unit: String,
    pub rate: f64,
    #[serde(rename = "taxRate")]
    pub tax_rate: f64,
    /// Line grand total (base plus active tax components).
    pub amount: f64,
    pub cgst: f64,
    pub igst: f64,
    pub utgst: f64,
}

/// Partial update for a line's editable inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub product_id: Option<Option<ProductId>>,
    pub particulars: Option<String>,
    pub hsn_code: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub rate: Option<f64>,
    pub tax_rate: Option<f64>,
}

impl InvoiceItem {
    /// Fresh empty line with the form defaults.
    pub fn blank() -> Self {
        Self {
            product_id: None,
            particulars: String::new(),
            hsn_code: String::new(),
            quantity: 1.0,
            unit: String::new(),
            rate: 0.0,
            tax_rate: 18.0,
            amount: 0.0,
            cgst: 0.0,
            igst: 0.0,
            utgst: 0.0,
        }
    }

    /// Fill a line from a catalog product and calculate its amounts.
    pub fn from_product(product: &Product, quantity: f64, settings: &TaxSettings) -> Self {
        let mut item = Self {
            product_id: Some(product.id),
            particulars: product.name.clone(),
            hsn_code: product.hsn_code.clone(),
            quantity,
            unit: product.unit.clone(),
            rate: product.rate,
            tax_rate: product.tax_rate,
            amount: 0.0,
            cgst: 0.0,
            igst: 0.0,
            utgst: 0.0,
        };
        item.recalculate(settings);
        item
    }

    /// Re-run the line calculator and store its outputs on the item.
    ///
    /// The line does not persist its own taxable base; only the total and
    /// the component amounts are stored.
    pub fn recalculate(&mut self, settings: &TaxSettings) {
        let amounts = calculate_item_amount(
            self.quantity,
            self.rate,
            self.tax_rate,
            settings.tax_included,
            settings,
        );
        self.amount = amounts.total_amount;
        self.cgst = amounts.cgst;
        self.igst = amounts.igst;
        self.utgst = amounts.utgst;
    }

    /// Caller-side guards the calculation engine itself does not perform.
    pub fn validate(&self) -> DomainResult<()> {
        if self.particulars.trim().is_empty() {
            return Err(DomainError::validation("item particulars are required"));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(DomainError::validation(
                "item quantity must be a non-negative number",
            ));
        }
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(DomainError::validation(
                "item rate must be a non-negative number",
            ));
        }
        if !self.tax_rate.is_finite() || !(0.0..=100.0).contains(&self.tax_rate) {
            return Err(DomainError::validation(
                "item tax rate must be a percentage between 0 and 100",
            ));
        }
        Ok(())
    }
}

impl TaxedLine for InvoiceItem {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn cgst(&self) -> f64 {
        self.cgst
    }

    fn igst(&self) -> f64 {
        self.igst
    }

    fn utgst(&self) -> f64 {
        self.utgst
    }
}

/// A tax invoice document.
///
/// `total_amount` (the aggregated taxable base), `total_tax` and
/// `grand_total` are denormalized alongside the items that produced them and
/// are refreshed on every mutation of items or tax settings — always a pure
/// function of the current items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: InvoiceId,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "clientId")]
    pub client_id: ClientId,
    pub items: Vec<InvoiceItem>,
    #[serde(rename = "companyInfo")]
    pub company_info: CompanyInfo,
    #[serde(rename = "bankDetails")]
    pub bank_details: BankDetails,
    #[serde(rename = "taxSettings")]
    pub tax_settings: TaxSettings,
    #[serde(rename = "termsAndConditions")]
    pub terms_and_conditions: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "totalTax")]
    pub total_tax: f64,
    #[serde(rename = "grandTotal")]
    pub grand_total: f64,
    pub status: InvoiceStatus,
}

/// Partial update for an invoice; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoicePatch {
    pub invoice_number: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub client_id: Option<ClientId>,
    pub items: Option<Vec<InvoiceItem>>,
    pub tax_settings: Option<TaxSettings>,
    pub terms_and_conditions: Option<String>,
    pub status: Option<InvoiceStatus>,
}

impl Invoice {
    /// Fresh draft invoice with no items and the default terms.
    pub fn new(
        id: InvoiceId,
        invoice_number: impl Into<String>,
        date: DateTime<Utc>,
        client_id: ClientId,
        company_info: CompanyInfo,
        bank_details: BankDetails,
        tax_settings: TaxSettings,
    ) -> Self {
        Self {
            id,
            invoice_number: invoice_number.into(),
            date,
            client_id,
            items: Vec::new(),
            company_info,
            bank_details,
            tax_settings,
            terms_and_conditions: DEFAULT_TERMS.to_string(),
            total_amount: 0.0,
            total_tax: 0.0,
            grand_total: 0.0,
            status: InvoiceStatus::Draft,
        }
    }

    /// Append a line; its amounts are recalculated under the invoice's
    /// current tax settings before totals are refreshed.
    pub fn add_item(&mut self, mut item: InvoiceItem) {
        item.recalculate(&self.tax_settings);
        self.items.push(item);
        self.refresh_totals();
    }

    /// Edit one line's inputs and recompute what depends on them.
    pub fn set_item(&mut self, index: usize, patch: ItemPatch) -> DomainResult<()> {
        let Some(item) = self.items.get_mut(index) else {
            return Err(DomainError::not_found());
        };

        let mut needs_recalc = false;
        if let Some(product_id) = patch.product_id {
            item.product_id = product_id;
        }
        if let Some(particulars) = patch.particulars {
            item.particulars = particulars;
        }
        if let Some(hsn_code) = patch.hsn_code {
            item.hsn_code = hsn_code;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
            needs_recalc = true;
        }
        if let Some(rate) = patch.rate {
            item.rate = rate;
            needs_recalc = true;
        }
        if let Some(tax_rate) = patch.tax_rate {
            item.tax_rate = tax_rate;
            needs_recalc = true;
        }

        if needs_recalc {
            item.recalculate(&self.tax_settings);
        }
        self.refresh_totals();
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> DomainResult<()> {
        if index >= self.items.len() {
            return Err(DomainError::not_found());
        }
        self.items.remove(index);
        self.refresh_totals();
        Ok(())
    }

    /// Switch tax settings and recalculate every line, then the totals.
    ///
    /// Items are always recomputed before totals.
    pub fn set_tax_settings(&mut self, settings: TaxSettings) {
        self.tax_settings = settings;
        for item in &mut self.items {
            item.recalculate(&self.tax_settings);
        }
        self.refresh_totals();
    }

    /// Apply a partial update, recomputing derived state as needed.
    pub fn apply(&mut self, patch: InvoicePatch) -> DomainResult<()> {
        if let Some(invoice_number) = patch.invoice_number {
            let invoice_number = invoice_number.trim().to_string();
            if invoice_number.is_empty() {
                return Err(DomainError::validation("invoice number is required"));
            }
            self.invoice_number = invoice_number;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(terms) = patch.terms_and_conditions {
            self.terms_and_conditions = terms;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }

        match (patch.items, patch.tax_settings) {
            (Some(items), Some(settings)) => {
                self.items = items;
                self.set_tax_settings(settings);
            }
            (Some(items), None) => {
                self.items = items;
                for item in &mut self.items {
                    item.recalculate(&self.tax_settings);
                }
                self.refresh_totals();
            }
            (None, Some(settings)) => self.set_tax_settings(settings),
            (None, None) => {}
        }
        Ok(())
    }

    /// Re-derive the denormalized totals from the current items.
    fn refresh_totals(&mut self) {
        let totals = calculate_invoice_totals(&self.items);
        self.total_amount = totals.base_amount;
        self.total_tax = totals.total_tax;
        self.grand_total = totals.grand_total;
    }

    /// Validation run before the document is persisted.
    pub fn validate(&self) -> DomainResult<()> {
        if self.invoice_number.trim().is_empty() {
            return Err(DomainError::validation("invoice number is required"));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation("at least one item is required"));
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }
}
