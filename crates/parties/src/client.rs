use serde::{Deserialize, Serialize};

use gstbill_core::{DomainError, DomainResult, EntityId};

/// Client identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub EntityId);

impl ClientId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ClientId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A client record: the party an invoice is billed to.
///
/// Stored fields are normalized on write: everything trimmed, GSTIN
/// uppercased, email lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: ClientId,
    pub name: String,
    pub gstin: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Create payload for a client (the backend assigns the id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub gstin: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Partial update for a client; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub gstin: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Client {
    /// Build a client from a draft, normalizing and validating it.
    pub fn new(id: ClientId, draft: ClientDraft) -> DomainResult<Self> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("client name is required"));
        }

        Ok(Self {
            id,
            name,
            gstin: draft.gstin.trim().to_uppercase(),
            address: draft.address.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            email: draft.email.trim().to_lowercase(),
        })
    }

    /// Apply a partial update, re-running normalization and validation.
    pub fn apply(&mut self, patch: ClientPatch) -> DomainResult<()> {
        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::validation("client name is required"));
            }
            self.name = name;
        }
        if let Some(gstin) = patch.gstin {
            self.gstin = gstin.trim().to_uppercase();
        }
        if let Some(address) = patch.address {
            self.address = address.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            self.phone = phone.trim().to_string();
        }
        if let Some(email) = patch.email {
            self.email = email.trim().to_lowercase();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client_id() -> ClientId {
        ClientId::new(EntityId::new())
    }

    fn sample_draft() -> ClientDraft {
        ClientDraft {
            name: "  Sharma Traders  ".to_string(),
            gstin: "04aabcs1429b1z2".to_string(),
            address: " Sector 17, Chandigarh ".to_string(),
            phone: "98765 43210".to_string(),
            email: "Accounts@SharmaTraders.IN ".to_string(),
        }
    }

    #[test]
    fn new_normalizes_stored_fields() {
        let client = Client::new(test_client_id(), sample_draft()).unwrap();
        assert_eq!(client.name, "Sharma Traders");
        assert_eq!(client.gstin, "04AABCS1429B1Z2");
        assert_eq!(client.address, "Sector 17, Chandigarh");
        assert_eq!(client.email, "accounts@sharmatraders.in");
    }

    #[test]
    fn new_rejects_blank_name() {
        let draft = ClientDraft {
            name: "   ".to_string(),
            ..sample_draft()
        };
        let err = Client::new(test_client_id(), draft).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for blank name"),
        }
    }

    #[test]
    fn apply_updates_only_provided_fields() {
        let mut client = Client::new(test_client_id(), sample_draft()).unwrap();
        client
            .apply(ClientPatch {
                phone: Some("011-2345678".to_string()),
                gstin: Some("07aaacs1429b1zx".to_string()),
                ..ClientPatch::default()
            })
            .unwrap();

        assert_eq!(client.phone, "011-2345678");
        assert_eq!(client.gstin, "07AAACS1429B1ZX");
        assert_eq!(client.name, "Sharma Traders");
    }

    #[test]
    fn apply_rejects_blank_name_and_leaves_record_intact() {
        let mut client = Client::new(test_client_id(), sample_draft()).unwrap();
        let err = client
            .apply(ClientPatch {
                name: Some("".to_string()),
                ..ClientPatch::default()
            })
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for blank name"),
        }
        assert_eq!(client.name, "Sharma Traders");
    }

    #[test]
    fn serializes_id_under_the_document_key() {
        let client = Client::new(test_client_id(), sample_draft()).unwrap();
        let json = serde_json::to_value(&client).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("id").is_none());
    }
}
