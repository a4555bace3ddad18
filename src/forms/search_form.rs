use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::actors::Notifier;
use crate::forms::{FormState, FormStatus, SubmitOutcome};
use crate::schema::{SearchQuery, SearchQueryInput, SearchQuerySchema, ValidationError};
use crate::storage::TransactionRepository;
use crate::store::{FetchOutcome, TransactionStore};

pub const SEARCH_FAILED_MESSAGE: &str = "Could not load transactions, please try again";

/// The single-field search bar above the transaction list.
pub struct SearchForm<R: TransactionRepository> {
    store: Arc<TransactionStore<R>>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<FormState<SearchQueryInput>>
}

impl<R: TransactionRepository> SearchForm<R> {
    pub fn new(store: Arc<TransactionStore<R>>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(FormState::default());

        Self { store, notifier, state }
    }

    pub fn query(&self) -> Option<String> {
        self.state.borrow().fields.query.clone()
    }

    pub fn status(&self) -> FormStatus {
        self.state.borrow().status.clone()
    }

    /// Whether the submit button shows the spinner and is disabled.
    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_submitting()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState<SearchQueryInput>> {
        self.state.subscribe()
    }

    pub fn set_query(&self, value: &str) {
        self.state.send_modify(|state| state.fields.query = Some(value.to_string()));
    }

    pub async fn submit(&self) -> SubmitOutcome<FetchOutcome> {
        let query = match self.begin_submit() {
            Some(Ok(query)) => query,
            Some(Err(error)) => return SubmitOutcome::Invalid(error),
            None => {
                debug!("Search form is already submitting");
                return SubmitOutcome::Ignored;
            }
        };

        let result = self.store.fetch_transactions(query).await;
        self.state.send_modify(|state| state.status = FormStatus::Idle);

        match result {
            Ok(outcome) => SubmitOutcome::Completed(outcome),
            Err(error) => {
                self.notifier.error(SEARCH_FAILED_MESSAGE);
                SubmitOutcome::Rejected(error)
            }
        }
    }

    fn begin_submit(&self) -> Option<Result<SearchQuery, ValidationError>> {
        let mut started = None;

        self.state.send_if_modified(|state| {
            if state.is_submitting() {
                return false;
            }

            let result = SearchQuerySchema::validate(&state.fields);

            match &result {
                Ok(_) => {
                    state.errors = None;
                    state.status = FormStatus::Submitting;
                }
                Err(error) => state.errors = Some(error.clone())
            }

            started = Some(result);
            true
        });

        started
    }
}
