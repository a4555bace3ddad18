use thiserror::Error;

use crate::models::DomainError;
use crate::storage::CollaboratorError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store precondition violated: {0}")]
    Domain(#[from] DomainError),
    #[error("Store collaborator failed: {0}")]
    Collaborator(#[from] CollaboratorError)
}
