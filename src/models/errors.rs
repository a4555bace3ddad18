use crate::models::{NewTransaction, TransactionType};
use crate::types::Price;
use thiserror::Error;

/// A store precondition that the form-side validation should have caught.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Description is blank for [{transaction_type}] of [{price}] in category [{category}]")]
    BlankDescription {
        price: Price,
        category: String,
        transaction_type: TransactionType
    },
    #[error("Category is blank for [{transaction_type}] of [{price}] described as [{description}]")]
    BlankCategory {
        description: String,
        price: Price,
        transaction_type: TransactionType
    }
}

impl DomainError {
    pub fn blank_description(payload: &NewTransaction) -> Self {
        Self::BlankDescription {
            price: payload.price,
            category: payload.category.clone(),
            transaction_type: payload.transaction_type
        }
    }

    pub fn blank_category(payload: &NewTransaction) -> Self {
        Self::BlankCategory {
            description: payload.description.clone(),
            price: payload.price,
            transaction_type: payload.transaction_type
        }
    }
}
