mod errors;
mod new_transaction;
mod search_query;

pub use errors::{Field, FieldError, FieldErrorKind, ValidationError};
pub use new_transaction::{NewTransactionInput, NewTransactionSchema};
pub use search_query::{SearchQuery, SearchQueryInput, SearchQuerySchema};
