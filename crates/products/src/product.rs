use serde::{Deserialize, Serialize};

use gstbill_core::{DomainError, DomainResult, EntityId};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A catalog product: the template an invoice line is filled from.
///
/// `rate` is the default unit price and `tax_rate` the nominal GST
/// percentage; both are copied onto invoice lines and may be edited there.
/// The HSN code is an opaque classification string, stored uppercased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "hsnCode")]
    pub hsn_code: String,
    pub unit: String,
    pub rate: f64,
    #[serde(rename = "taxRate")]
    pub tax_rate: f64,
    pub description: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// Create payload for a product (the backend assigns the id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub hsn_code: String,
    pub unit: String,
    pub rate: f64,
    pub tax_rate: f64,
    pub description: String,
}

/// Partial update for a product; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub hsn_code: Option<String>,
    pub unit: Option<String>,
    pub rate: Option<f64>,
    pub tax_rate: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

fn validate_rate(rate: f64) -> DomainResult<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(DomainError::validation("rate must be a non-negative number"));
    }
    Ok(())
}

fn validate_tax_rate(tax_rate: f64) -> DomainResult<()> {
    if !tax_rate.is_finite() || !(0.0..=100.0).contains(&tax_rate) {
        return Err(DomainError::validation(
            "tax rate must be a percentage between 0 and 100",
        ));
    }
    Ok(())
}

impl Product {
    /// Build a product from a draft, normalizing and validating it.
    pub fn new(id: ProductId, draft: ProductDraft) -> DomainResult<Self> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product name is required"));
        }

        let unit = draft.unit.trim().to_string();
        if unit.is_empty() {
            return Err(DomainError::validation("product unit is required"));
        }

        validate_rate(draft.rate)?;
        validate_tax_rate(draft.tax_rate)?;

        Ok(Self {
            id,
            name,
            hsn_code: draft.hsn_code.trim().to_uppercase(),
            unit,
            rate: draft.rate,
            tax_rate: draft.tax_rate,
            description: draft.description.trim().to_string(),
            is_active: true,
        })
    }

    /// Apply a partial update, re-running normalization and validation.
    pub fn apply(&mut self, patch: ProductPatch) -> DomainResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("product name is required"));
            }
        }
        if let Some(unit) = &patch.unit {
            if unit.trim().is_empty() {
                return Err(DomainError::validation("product unit is required"));
            }
        }
        if let Some(rate) = patch.rate {
            validate_rate(rate)?;
        }
        if let Some(tax_rate) = patch.tax_rate {
            validate_tax_rate(tax_rate)?;
        }

        // All checks passed; commit the patch.
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(hsn_code) = patch.hsn_code {
            self.hsn_code = hsn_code.trim().to_uppercase();
        }
        if let Some(unit) = patch.unit {
            self.unit = unit.trim().to_string();
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(tax_rate) = patch.tax_rate {
            self.tax_rate = tax_rate;
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }
}
