use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, warn};

use crate::actors::Notifier;
use crate::forms::{SearchForm, SubmitOutcome, TransactionForm};
use crate::schema::{NewTransactionInput, SearchQuery};
use crate::storage::TransactionRepository;
use crate::store::TransactionStore;
use crate::views::{Header, TransactionsTable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub created: usize,
    pub invalid: usize,
    pub rejected: usize
}

/// A scripted user session: every CSV row is typed into the new-transaction
/// dialog and submitted, then the optional search runs.
///
/// The session renders the transactions table after every store change, the
/// table is what the session shows when it ends.
pub struct Session<R: TransactionRepository> {
    store: Arc<TransactionStore<R>>,
    header: Header,
    table: TransactionsTable,
    transaction_form: TransactionForm<R>,
    search_form: SearchForm<R>,
    backpressure: usize
}

impl<R: TransactionRepository> Session<R> {
    pub fn new(store: Arc<TransactionStore<R>>, notifier: Arc<dyn Notifier>) -> Self {
        let header = Header::new();
        let transaction_form = TransactionForm::new(store.clone(), notifier.clone(), header.new_transaction_modal());
        let search_form = SearchForm::new(store.clone(), notifier);
        let table = TransactionsTable::subscribe(&store);

        Self {
            store,
            header,
            table,
            transaction_form,
            search_form,
            backpressure: 256
        }
    }

    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    pub fn table(&self) -> &TransactionsTable {
        &self.table
    }

    /// Ends the session, closing its forms, and keeps the last rendered table.
    pub fn into_table(self) -> TransactionsTable {
        self.table
    }

    pub async fn run(&mut self, path: &str, query: Option<&str>) -> anyhow::Result<SessionReport> {
        if let Err(error) = self.store.fetch_transactions(SearchQuery::all()).await {
            error!("Initial transaction load failed: {error}");
        }
        self.table.refresh();

        let (sender, receiver) = mpsc::channel::<(usize, NewTransactionInput)>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_string(), sender);
        let report = self.submit_transactions(receiver).await;

        if let Err(error) = csv_handle.await {
            error!("CSV ingestion failed: {error}");
        }

        if let Some(query) = query {
            self.search(query).await;
        }

        debug!("Table rendered [{}] times, showing [{}] rows", self.table.render_count(), self.table.rows().len());

        Ok(report)
    }

    fn spawn_csv_reader(&self, path: String, sender: mpsc::Sender<(usize, NewTransactionInput)>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening CSV at path: {path} | {error}");
                    return;
                }
            };

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            for (index, result) in reader.deserialize::<NewTransactionInput>().enumerate() {
                //NOTE: Line 1 is the header
                let line = index + 2;

                match result {
                    Ok(input) => {
                        if sender.blocking_send((line, input)).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        error!("CSV deserialization error on line [{line}]: {error}");
                    }
                }
            }
        })
    }

    async fn submit_transactions(&mut self, mut receiver: mpsc::Receiver<(usize, NewTransactionInput)>) -> SessionReport {
        let mut report = SessionReport::default();

        while let Some((line, input)) = receiver.recv().await {
            self.header.open_new_transaction();
            self.transaction_form.fill(input);

            match self.transaction_form.submit().await {
                SubmitOutcome::Completed(transaction) => {
                    debug!("Line [{line}] created transaction [{}]", transaction.id);
                    report.created += 1;
                }
                SubmitOutcome::Invalid(error) => {
                    warn!("Line [{line}] skipped: {error}");
                    self.transaction_form.close();
                    report.invalid += 1;
                }
                SubmitOutcome::Rejected(error) => {
                    warn!("Line [{line}] was not stored: {error}");
                    self.transaction_form.close();
                    report.rejected += 1;
                }
                SubmitOutcome::Ignored => {
                    error!("Line [{line}] was ignored because a submission was still in flight");
                    report.rejected += 1;
                }
            }

            self.table.refresh();
        }

        report
    }

    async fn search(&mut self, query: &str) {
        self.search_form.set_query(query);

        match self.search_form.submit().await {
            SubmitOutcome::Completed(outcome) => debug!("Search for [{query}] finished: {outcome:?}"),
            SubmitOutcome::Rejected(error) => error!("Search for [{query}] failed: {error}"),
            SubmitOutcome::Invalid(error) => warn!("Search for [{query}] is invalid: {error}"),
            SubmitOutcome::Ignored => warn!("Search for [{query}] was ignored")
        }

        self.table.refresh();
    }
}
