mod errors;
mod selector;
mod transaction_store;

pub use errors::StoreError;
pub use selector::Selector;
pub use transaction_store::{FetchOutcome, StoreState, TransactionStore};
