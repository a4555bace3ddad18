use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::actors::Notifier;
use crate::forms::{FormState, FormStatus, SubmitOutcome};
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::schema::{NewTransactionInput, NewTransactionSchema, ValidationError};
use crate::storage::TransactionRepository;
use crate::store::TransactionStore;
use crate::views::Modal;

pub const CREATED_MESSAGE: &str = "Transaction added successfully!";
pub const CREATE_FAILED_MESSAGE: &str = "Could not add the transaction, please try again";

/// The "new transaction" dialog content.
///
/// Holds only the store's create action, so list updates never touch it.
pub struct TransactionForm<R: TransactionRepository> {
    store: Arc<TransactionStore<R>>,
    notifier: Arc<dyn Notifier>,
    modal: Modal,
    state: watch::Sender<FormState<NewTransactionInput>>
}

impl<R: TransactionRepository> TransactionForm<R> {
    pub fn new(store: Arc<TransactionStore<R>>, notifier: Arc<dyn Notifier>, modal: Modal) -> Self {
        let (state, _) = watch::channel(initial_state());

        Self { store, notifier, modal, state }
    }

    pub fn fields(&self) -> NewTransactionInput {
        self.state.borrow().fields.clone()
    }

    pub fn errors(&self) -> Option<ValidationError> {
        self.state.borrow().errors.clone()
    }

    pub fn status(&self) -> FormStatus {
        self.state.borrow().status.clone()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.state.borrow().is_submitting()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState<NewTransactionInput>> {
        self.state.subscribe()
    }

    pub fn set_description(&self, value: &str) {
        self.state.send_modify(|state| state.fields.description = Some(value.to_string()));
    }

    pub fn set_price(&self, value: &str) {
        self.state.send_modify(|state| state.fields.price = Some(value.to_string()));
    }

    pub fn set_category(&self, value: &str) {
        self.state.send_modify(|state| state.fields.category = Some(value.to_string()));
    }

    pub fn set_type(&self, transaction_type: TransactionType) {
        self.state.send_modify(|state| state.fields.transaction_type = Some(transaction_type.to_string()));
    }

    /// Replaces every field at once, as a paste or an import would.
    pub fn fill(&self, fields: NewTransactionInput) {
        self.state.send_modify(|state| state.fields = fields);
    }

    /// Validates the fields and, when they pass, creates the transaction.
    ///
    /// On success the fields are reset and the dialog closes. On a store
    /// failure the fields stay as entered and the dialog stays open.
    pub async fn submit(&self) -> SubmitOutcome<Transaction> {
        let payload = match self.begin_submit() {
            Some(Ok(payload)) => payload,
            Some(Err(error)) => {
                debug!("New transaction form is invalid: {error}");
                return SubmitOutcome::Invalid(error);
            }
            None => {
                debug!("New transaction form is already submitting");
                return SubmitOutcome::Ignored;
            }
        };

        match self.store.create_transaction(payload).await {
            Ok(transaction) => {
                self.state.send_modify(|state| *state = initial_state());
                self.notifier.success(CREATED_MESSAGE);
                self.modal.close();

                SubmitOutcome::Completed(transaction)
            }
            Err(error) => {
                self.state.send_modify(|state| state.status = FormStatus::Failed(error.to_string()));
                self.notifier.error(CREATE_FAILED_MESSAGE);

                SubmitOutcome::Rejected(error)
            }
        }
    }

    /// The close button: closes the dialog and clears what was typed.
    pub fn close(&self) {
        self.modal.close();
        self.state.send_modify(|state| {
            state.fields = initial_state().fields;
            state.errors = None;

            if !state.is_submitting() {
                state.status = FormStatus::Idle;
            }
        });
    }

    /// Moves to `Submitting` if the fields pass, as one step so a second
    /// submit can never slip in between the check and the transition.
    fn begin_submit(&self) -> Option<Result<NewTransaction, ValidationError>> {
        let mut started = None;

        self.state.send_if_modified(|state| {
            if state.is_submitting() {
                return false;
            }

            match NewTransactionSchema::validate(&state.fields) {
                Ok(payload) => {
                    state.errors = None;
                    state.status = FormStatus::Submitting;
                    started = Some(Ok(payload));
                }
                Err(error) => {
                    state.errors = Some(error.clone());
                    state.status = FormStatus::Idle;
                    started = Some(Err(error));
                }
            }

            true
        });

        started
    }
}

fn initial_state() -> FormState<NewTransactionInput> {
    FormState {
        fields: NewTransactionInput {
            transaction_type: Some(TransactionType::Income.to_string()),
            ..NewTransactionInput::default()
        },
        errors: None,
        status: FormStatus::Idle
    }
}
