use serde::Serialize;
use time::OffsetDateTime;

use crate::models::errors::DomainError;
use crate::models::TransactionType;
use crate::types::{Price, TransactionId};

/// A recorded income or outcome entry.
///
/// Records are immutable once the persistence collaborator has assigned the
/// `id` and `created_at` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Identifier assigned by the persistence collaborator.
    pub id: TransactionId,
    /// What the money was for.
    pub description: String,
    /// Amount as a positive magnitude, see `transaction_type` for the direction.
    pub price: Price,
    /// Free-text label used to group entries.
    pub category: String,
    /// Whether the money came in or went out.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the collaborator stored the record.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime
}

impl Transaction {
    /// Builds the stored record for a validated payload.
    pub fn from_payload(id: TransactionId, payload: &NewTransaction, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            description: payload.description.clone(),
            price: payload.price,
            category: payload.category.clone(),
            transaction_type: payload.transaction_type,
            created_at
        }
    }

    /// True when the stored fields are the ones that were submitted.
    pub fn matches_payload(&self, payload: &NewTransaction) -> bool {
        self.description == payload.description
            && self.price == payload.price
            && self.category == payload.category
            && self.transaction_type == payload.transaction_type
    }

    /// Case-insensitive substring match on the description.
    pub fn matches_query(&self, needle: &str) -> bool {
        needle.is_empty() || self.description.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// A creation payload that passed the new-transaction schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub description: String,
    pub price: Price,
    pub category: String,
    pub transaction_type: TransactionType
}

impl NewTransaction {
    /// Re-checks the creation invariant for payloads that did not come through the schema.
    ///
    /// # Errors
    /// Returns `DomainError` if the description or the category is blank.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.description.trim().is_empty() {
            return Err(DomainError::blank_description(self))
        }

        if self.category.trim().is_empty() {
            return Err(DomainError::blank_category(self))
        }

        Ok(())
    }
}

/// Orders by `created_at` descending, newer ids first on equal timestamps.
pub fn sort_most_recent_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
    });
}
