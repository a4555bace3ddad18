mod search_form;
mod transaction_form;

use crate::schema::ValidationError;
use crate::store::StoreError;

pub use search_form::SearchForm;
pub use transaction_form::TransactionForm;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    /// Back to idle after a store failure, with the message that was toasted.
    Failed(String)
}

/// What a form currently shows: its values, inline errors and submit state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState<F> {
    pub fields: F,
    pub errors: Option<ValidationError>,
    pub status: FormStatus
}

impl<F> FormState<F> {
    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }
}

#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// The store accepted the submission.
    Completed(T),
    /// The schema rejected the fields, nothing was sent to the store.
    Invalid(ValidationError),
    /// The store failed, the failure was turned into a toast.
    Rejected(StoreError),
    /// A submission was already in flight, the submit control is disabled.
    Ignored
}
