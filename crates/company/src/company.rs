use serde::{Deserialize, Serialize};

use gstbill_core::{DomainError, DomainResult, EntityId};

/// Company identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub EntityId);

impl CompanyId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Bank account details printed on invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    #[serde(rename = "bankName")]
    pub bank_name: String,
    #[serde(rename = "accountNumber")]
    pub account_number: String,
    #[serde(rename = "ifscCode")]
    pub ifsc_code: String,
    #[serde(rename = "branchName")]
    pub branch_name: String,
}

/// Invoice numbering configuration.
///
/// `current_number` is the last number issued; `starting_number` is the floor
/// for the first issued number (so a business migrating mid-series can start
/// at, say, 120).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    pub prefix: String,
    #[serde(rename = "startingNumber")]
    pub starting_number: u32,
    #[serde(rename = "currentNumber")]
    pub current_number: u32,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            prefix: "INV".to_string(),
            starting_number: 1,
            current_number: 0,
        }
    }
}

impl InvoiceSettings {
    fn next_number(&self) -> u32 {
        (self.current_number + 1).max(self.starting_number)
    }

    /// Preview the next invoice number, e.g. `INV-0001`.
    pub fn next_invoice_number(&self) -> String {
        format!("{}-{:04}", self.prefix, self.next_number())
    }

    /// Advance the counter after an invoice has been issued.
    pub fn record_issued(&mut self) {
        self.current_number = self.next_number();
    }
}

/// Seller identity embedded into invoices at issue time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub gstin: String,
    pub address: String,
}

/// The single company profile behind an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(rename = "_id")]
    pub id: CompanyId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub gstin: String,
    pub address: String,
    #[serde(rename = "bankDetails")]
    pub bank_details: BankDetails,
    #[serde(rename = "invoiceSettings")]
    pub invoice_settings: InvoiceSettings,
}

/// Partial update for the company profile; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gstin: Option<String>,
    pub address: Option<String>,
    pub bank_details: Option<BankDetails>,
    pub invoice_settings: Option<InvoiceSettings>,
}

impl CompanyProfile {
    /// Fresh profile with placeholder name and default numbering.
    pub fn new(id: CompanyId) -> Self {
        Self {
            id,
            name: "Company Name".to_string(),
            phone: String::new(),
            email: String::new(),
            gstin: String::new(),
            address: String::new(),
            bank_details: BankDetails::default(),
            invoice_settings: InvoiceSettings::default(),
        }
    }

    /// Snapshot of the seller identity for embedding into an invoice.
    pub fn info(&self) -> CompanyInfo {
        CompanyInfo {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            gstin: self.gstin.clone(),
            address: self.address.clone(),
        }
    }

    /// Apply a partial update, normalizing and validating it.
    pub fn apply(&mut self, patch: CompanyPatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::validation("company name is required"));
            }
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone.trim().to_string();
        }
        if let Some(email) = patch.email {
            self.email = email.trim().to_lowercase();
        }
        if let Some(gstin) = patch.gstin {
            self.gstin = gstin.trim().to_uppercase();
        }
        if let Some(address) = patch.address {
            self.address = address.trim().to_string();
        }
        if let Some(bank_details) = patch.bank_details {
            self.bank_details = bank_details;
        }
        if let Some(invoice_settings) = patch.invoice_settings {
            self.invoice_settings = invoice_settings;
        }
        Ok(())
    }
}
