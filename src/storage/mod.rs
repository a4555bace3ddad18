mod errors;
mod memory_repository;
#[cfg(test)]
pub mod testing;

use crate::models::{NewTransaction, Transaction};
use crate::schema::SearchQuery;

pub use errors::CollaboratorError;
pub use memory_repository::InMemoryRepository;

/// The persistence collaborator behind the transaction store.
///
/// Implementations decide where records live and assign `id` and `created_at`.
/// `list` answers most-recent-first.
pub trait TransactionRepository: Send + Sync + 'static {
    fn list(&self, query: &SearchQuery) -> impl Future<Output = Result<Vec<Transaction>, CollaboratorError>> + Send;
    fn create(&self, payload: &NewTransaction) -> impl Future<Output = Result<Transaction, CollaboratorError>> + Send;
}
